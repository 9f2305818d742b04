//! Per-user quiz session state machine.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::matching::Verdict;
use crate::oracle::{Oracle, SynonymLookup};
use crate::vocabulary::{Vocabulary, VocabularyEntry};

/// How words are shown and what answer is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Show term and translation, no answer expected.
    #[serde(alias = "learn")]
    Present,
    /// Show the term, expect the translation.
    #[serde(alias = "test")]
    Quiz,
    /// Show the translation, expect the term.
    #[serde(alias = "exam")]
    Examine,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Present, Mode::Quiz, Mode::Examine];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Quiz => "quiz",
            Self::Examine => "examine",
        }
    }

    /// Menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Present => "📘 Learn",
            Self::Quiz => "📝 Quiz",
            Self::Examine => "🎓 Exam",
        }
    }

    /// Parse a mode name. Accepts the legacy `learn`/`test`/`exam` names.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "present" | "learn" => Some(Self::Present),
            "quiz" | "test" => Some(Self::Quiz),
            "examine" | "exam" => Some(Self::Examine),
            _ => None,
        }
    }

    pub fn expects_answer(&self) -> bool {
        !matches!(self, Self::Present)
    }
}

/// Where a user is in the quiz lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    AwaitingModeSelection,
    InProgress,
    Complete,
}

impl SessionState {
    pub fn of(session: Option<&Session>) -> Self {
        session.map_or(Self::AwaitingModeSelection, Session::state)
    }
}

/// Final (or current) score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub score: usize,
    pub total: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Done.\nCorrect: {}/{}", self.score, self.total)
    }
}

/// One word shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub mode: Mode,
    pub entry: VocabularyEntry,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let VocabularyEntry { term, translation } = &self.entry;
        match self.mode {
            Mode::Present => write!(f, "{} — {}", term, translation),
            Mode::Quiz => write!(f, "{} — ?", term),
            Mode::Examine => write!(f, "{} — ?", translation),
        }
    }
}

/// Outcome of asking a session for its next prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Display-only prompt; the cursor has already moved past it.
    Show(Prompt),
    /// Waiting for an answer to this prompt.
    Ask(Prompt),
    Finished(Summary),
}

/// Outcome of submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Judged(Verdict),
    /// No answer was expected; nothing changed.
    Ignored(Summary),
}

/// One user's run through a shuffled vocabulary.
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    sequence: Vec<VocabularyEntry>,
    cursor: usize,
    score: usize,
}

impl Session {
    /// Start a session over a uniformly shuffled copy of the vocabulary.
    pub fn start(mode: Mode, vocabulary: &Vocabulary) -> Self {
        Self::start_with_rng(mode, vocabulary, &mut rand::thread_rng())
    }

    pub fn start_with_rng<R: Rng + ?Sized>(
        mode: Mode,
        vocabulary: &Vocabulary,
        rng: &mut R,
    ) -> Self {
        let mut sequence = vocabulary.entries().to_vec();
        sequence.shuffle(rng);
        Self::from_sequence(mode, sequence)
    }

    /// Start a session over a fixed sequence.
    pub fn from_sequence(mode: Mode, sequence: Vec<VocabularyEntry>) -> Self {
        Self {
            mode,
            sequence,
            cursor: 0,
            score: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sequence(&self) -> &[VocabularyEntry] {
        &self.sequence
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.sequence.len()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.sequence.len()
    }

    pub fn state(&self) -> SessionState {
        if self.is_complete() {
            SessionState::Complete
        } else {
            SessionState::InProgress
        }
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            total: self.sequence.len(),
        }
    }

    fn current(&self) -> Option<&VocabularyEntry> {
        self.sequence.get(self.cursor)
    }

    /// The answer the current prompt expects, if any.
    pub fn expected_answer(&self) -> Option<&str> {
        let entry = self.current()?;
        match self.mode {
            Mode::Present => None,
            Mode::Quiz => Some(&entry.translation),
            Mode::Examine => Some(&entry.term),
        }
    }

    /// Produce the next prompt. Present mode advances immediately.
    pub fn next_prompt(&mut self) -> Step {
        let Some(entry) = self.current().cloned() else {
            return Step::Finished(self.summary());
        };

        let prompt = Prompt {
            mode: self.mode,
            entry,
        };
        if self.mode.expects_answer() {
            Step::Ask(prompt)
        } else {
            self.cursor += 1;
            Step::Show(prompt)
        }
    }

    /// Judge an answer to the current prompt and move on.
    pub async fn submit_answer<L: SynonymLookup>(
        &mut self,
        oracle: &Oracle<L>,
        raw_answer: &str,
    ) -> Submission {
        let Some(expected) = self.expected_answer().map(str::to_owned) else {
            tracing::debug!(
                mode = self.mode.as_str(),
                position = self.cursor,
                "Answer submitted while none is expected"
            );
            return Submission::Ignored(self.summary());
        };

        let verdict = oracle.evaluate(raw_answer, &expected).await;
        if verdict.is_correct {
            self.score += 1;
        }
        self.cursor += 1;
        Submission::Judged(verdict)
    }
}
