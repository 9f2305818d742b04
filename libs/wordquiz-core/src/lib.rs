//! Core word-quiz library used by the server.
//!
//! Provides:
//! - Vocabulary file parser
//! - Answer matching (exact, substring, Ratcliff/Obershelp ratio)
//! - Similarity oracle with a cached synonym source
//! - Per-user session state machine and event dispatcher

pub mod engine;
pub mod error;
pub mod matching;
pub mod oracle;
pub mod session;
pub mod vocabulary;

pub use engine::{Event, QuizEngine, Reply};
pub use error::{LookupError, Result, VocabularyError};
pub use matching::{
    local_verdict, normalize, sequence_ratio, MatchReason, Verdict, DEFAULT_FUZZY_THRESHOLD,
};
pub use oracle::{NoSynonyms, Oracle, OracleSettings, SynonymCache, SynonymLookup};
pub use session::{Mode, Prompt, Session, SessionState, Step, Submission, Summary};
pub use vocabulary::{parse, LinePolicy, Vocabulary, VocabularyEntry};
