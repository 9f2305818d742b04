//! Similarity oracle: local matching plus an optional synonym source.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::LookupError;
use crate::matching::{local_verdict, normalize, MatchReason, Verdict, DEFAULT_FUZZY_THRESHOLD};

/// Source of synonyms for an expected answer.
#[async_trait]
pub trait SynonymLookup: Send + Sync {
    /// Lowercased synonyms of `word`, in source order.
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LookupError>;
}

#[async_trait]
impl SynonymLookup for Box<dyn SynonymLookup> {
    async fn lookup(&self, word: &str) -> Result<Vec<String>, LookupError> {
        (**self).lookup(word).await
    }
}

/// Lookup that never finds anything. Used when running offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

#[async_trait]
impl SynonymLookup for NoSynonyms {
    async fn lookup(&self, _word: &str) -> Result<Vec<String>, LookupError> {
        Ok(Vec::new())
    }
}

/// Process-lifetime cache in front of a lookup.
///
/// Only successful lookups are stored, so a failed request is retried the
/// next time the same word comes up.
pub struct SynonymCache<L> {
    inner: L,
    entries: RwLock<HashMap<String, Vec<String>>>,
}

impl<L: SynonymLookup> SynonymCache<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub async fn get(&self, word: &str) -> Result<Vec<String>, LookupError> {
        if let Some(hit) = self.cached(word) {
            return Ok(hit);
        }

        let synonyms = self.inner.lookup(word).await?;
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(word.to_string(), synonyms.clone());
        }
        Ok(synonyms)
    }

    fn cached(&self, word: &str) -> Option<Vec<String>> {
        self.entries.read().ok()?.get(word).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached entry, e.g. after the vocabulary is reloaded.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}

/// Oracle tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleSettings {
    pub fuzzy_threshold: f64,
    pub online_synonyms: bool,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            online_synonyms: true,
        }
    }
}

/// Decides whether a free-text answer matches the expected one.
pub struct Oracle<L> {
    synonyms: SynonymCache<L>,
    settings: OracleSettings,
}

impl<L: SynonymLookup> Oracle<L> {
    pub fn new(lookup: L, settings: OracleSettings) -> Self {
        Self {
            synonyms: SynonymCache::new(lookup),
            settings,
        }
    }

    pub fn settings(&self) -> &OracleSettings {
        &self.settings
    }

    pub fn synonym_cache(&self) -> &SynonymCache<L> {
        &self.synonyms
    }

    /// Evaluate an answer. Never fails: lookup errors count as "no synonyms".
    pub async fn evaluate(&self, answer: &str, expected: &str) -> Verdict {
        if let Some(verdict) = local_verdict(answer, expected, self.settings.fuzzy_threshold) {
            return verdict;
        }

        if self.settings.online_synonyms {
            let word = normalize(expected);
            let synonyms = match self.synonyms.get(&word).await {
                Ok(synonyms) => synonyms,
                Err(e) => {
                    tracing::warn!(word = %word, error = %e, "Synonym lookup failed");
                    Vec::new()
                }
            };

            let answer = normalize(answer);
            if synonyms.iter().any(|s| *s == answer) {
                return Verdict::correct(MatchReason::OnlineSynonym);
            }
        }

        Verdict::incorrect(expected)
    }
}

impl Oracle<NoSynonyms> {
    /// Oracle that only performs local checks.
    pub fn offline() -> Self {
        Self::new(
            NoSynonyms,
            OracleSettings {
                online_synonyms: false,
                ..OracleSettings::default()
            },
        )
    }
}
