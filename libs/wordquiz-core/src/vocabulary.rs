//! Vocabulary file loader.
//!
//! # Format
//! ```text
//! cat кот
//! "ice cream" мороженое
//! dog собака, пёс
//! ```
//!
//! A line with a double quote anywhere is tokenized into quoted groups and
//! whitespace-separated runs; the first token (quotes stripped) is the term
//! and the rest, joined by single spaces, is the translation. Any other line
//! is split at its first whitespace character.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VocabularyError};

/// A single word pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub translation: String,
}

impl VocabularyEntry {
    pub fn new(term: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            translation: translation.into(),
        }
    }
}

/// What to do with a line that has no separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinePolicy {
    /// Log the line and keep going.
    #[default]
    Lenient,
    /// Fail the whole load.
    Strict,
}

/// Read-only word list, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: Vec<VocabularyEntry>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Load a vocabulary file from disk.
    pub fn load(path: impl AsRef<Path>, policy: LinePolicy) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let vocabulary = parse(&content, policy)?;
        tracing::info!(
            path = %path.display(),
            entries = vocabulary.len(),
            "Loaded vocabulary"
        );
        Ok(vocabulary)
    }

    /// Build from pairs. Later duplicates overwrite earlier translations.
    pub fn from_pairs<I, T, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
        T: Into<String>,
        U: Into<String>,
    {
        let mut vocabulary = Self::default();
        for (term, translation) in pairs {
            vocabulary.insert(term.into(), translation.into());
        }
        vocabulary
    }

    fn insert(&mut self, term: String, translation: String) {
        match self.index.get(&term) {
            Some(&idx) => self.entries[idx].translation = translation,
            None => {
                self.index.insert(term.clone(), self.entries.len());
                self.entries.push(VocabularyEntry { term, translation });
            }
        }
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    /// Translation for a term, if present.
    pub fn get(&self, term: &str) -> Option<&str> {
        self.index
            .get(term)
            .map(|&idx| self.entries[idx].translation.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse vocabulary file content.
pub fn parse(content: &str, policy: LinePolicy) -> Result<Vocabulary> {
    let mut vocabulary = Vocabulary::default();

    for (idx, raw) in content.lines().enumerate() {
        let line_num = idx + 1;
        match parse_line(raw) {
            LineType::Empty => {}
            LineType::Pair(term, translation) => vocabulary.insert(term, translation),
            LineType::Malformed(line) => match policy {
                LinePolicy::Strict => {
                    return Err(VocabularyError::MalformedLine {
                        line: line_num,
                        content: line.to_string(),
                    })
                }
                LinePolicy::Lenient => {
                    tracing::warn!(line = line_num, content = line, "Skipping malformed vocabulary line");
                }
            },
        }
    }

    Ok(vocabulary)
}

enum LineType<'a> {
    Empty,
    Pair(String, String),
    Malformed(&'a str),
}

fn parse_line(raw: &str) -> LineType<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return LineType::Empty;
    }

    if line.contains('"') {
        let mut tokens = token_pattern().find_iter(line).map(|m| m.as_str());
        // A trimmed non-empty line always yields at least one token.
        let term = tokens.next().unwrap_or_default().trim_matches('"');
        let translation = tokens.collect::<Vec<_>>().join(" ");
        return LineType::Pair(term.to_string(), translation);
    }

    match line.split_once(char::is_whitespace) {
        Some((term, translation)) => {
            LineType::Pair(term.to_string(), translation.trim_start().to_string())
        }
        None => LineType::Malformed(line),
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""[^"]*"|\S+"#).expect("token pattern is valid"))
}
