//! Answer matching: exact, substring and fuzzy checks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Answers scoring strictly above this ratio are accepted.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.65;

/// Why an answer was accepted or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "kebab-case")]
pub enum MatchReason {
    Exact,
    PartialSubstring,
    FuzzySimilarity { ratio: f64 },
    OnlineSynonym,
    Incorrect { expected: String },
}

impl MatchReason {
    /// Stable tag name.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::PartialSubstring => "partial-substring",
            Self::FuzzySimilarity { .. } => "fuzzy-similarity",
            Self::OnlineSynonym => "online-synonym",
            Self::Incorrect { .. } => "incorrect",
        }
    }
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub is_correct: bool,
    pub reason: MatchReason,
}

impl Verdict {
    pub fn correct(reason: MatchReason) -> Self {
        Self {
            is_correct: true,
            reason,
        }
    }

    pub fn incorrect(expected: impl Into<String>) -> Self {
        Self {
            is_correct: false,
            reason: MatchReason::Incorrect {
                expected: expected.into(),
            },
        }
    }

    pub fn tag(&self) -> &'static str {
        self.reason.tag()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            MatchReason::Exact => write!(f, "✓ Correct"),
            MatchReason::PartialSubstring => write!(f, "✓ Almost (partial match)"),
            MatchReason::FuzzySimilarity { ratio } => {
                write!(f, "✓ Almost ({:.0}% match)", ratio * 100.0)
            }
            MatchReason::OnlineSynonym => write!(f, "✓ Correct (online synonym)"),
            MatchReason::Incorrect { expected } => {
                write!(f, "✗ Incorrect\nCorrect answer: {}", expected)
            }
        }
    }
}

/// Trim and lowercase.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Run the local checks in priority order.
///
/// Returns `None` when nothing matched and the synonym source should be
/// consulted. The empty answer is a substring of every expected answer and
/// is therefore accepted.
pub fn local_verdict(answer: &str, expected: &str, fuzzy_threshold: f64) -> Option<Verdict> {
    let a = normalize(answer);
    let c = normalize(expected);

    if a == c {
        return Some(Verdict::correct(MatchReason::Exact));
    }

    if c.contains(a.as_str()) || a.contains(c.as_str()) {
        return Some(Verdict::correct(MatchReason::PartialSubstring));
    }

    let ratio = sequence_ratio(&a, &c);
    if ratio > fuzzy_threshold {
        return Some(Verdict::correct(MatchReason::FuzzySimilarity { ratio }));
    }

    None
}

/// Ratcliff/Obershelp similarity: `2 * matched / (len(a) + len(b))`.
///
/// Matched characters are found by taking the longest common block, then
/// repeating on the unmatched pieces to its left and right.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b_positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b_positions.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_positions, alo, ahi, blo, bhi);
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }

    matched
}

/// Longest block `a[i..i+size] == b[j..j+size]` inside the given window.
/// Ties go to the smallest `i`, then the smallest `j`.
fn longest_match(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // Length of the match ending at a[i - 1], b[j]
    let mut lengths: HashMap<usize, usize> = HashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_lengths = HashMap::new();
        if let Some(positions) = b_positions.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| lengths.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_lengths.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        lengths = next_lengths;
    }

    (best_i, best_j, best_size)
}
