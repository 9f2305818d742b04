//! Event dispatch between a transport and the session state machine.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::matching::Verdict;
use crate::oracle::{Oracle, SynonymLookup};
use crate::session::{Mode, Prompt, Session, Step, Submission, Summary};
use crate::vocabulary::Vocabulary;

/// Input from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ModeSelected(Mode),
    TextSubmitted(String),
}

/// Output for the transport to render, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Reply {
    Started,
    Prompt(Prompt),
    Verdict(Verdict),
    Summary(Summary),
    SelectModeFirst,
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Let's go."),
            Self::Prompt(prompt) => write!(f, "{}", prompt),
            Self::Verdict(verdict) => write!(f, "{}", verdict),
            Self::Summary(summary) => write!(f, "{}", summary),
            Self::SelectModeFirst => write!(f, "Choose a mode to begin."),
        }
    }
}

/// Shared, read-only quiz machinery. Sessions are owned by the caller.
pub struct QuizEngine<L> {
    vocabulary: Arc<Vocabulary>,
    oracle: Oracle<L>,
}

impl<L: SynonymLookup> QuizEngine<L> {
    pub fn new(vocabulary: Arc<Vocabulary>, oracle: Oracle<L>) -> Self {
        Self { vocabulary, oracle }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn oracle(&self) -> &Oracle<L> {
        &self.oracle
    }

    /// Apply one event to a user's session slot.
    ///
    /// `None` means no mode has been selected yet. Selecting a mode always
    /// replaces whatever was in the slot.
    pub async fn handle(&self, slot: &mut Option<Session>, event: Event) -> Vec<Reply> {
        match event {
            Event::ModeSelected(mode) => {
                tracing::debug!(mode = mode.as_str(), "Starting session");
                let session = slot.insert(Session::start(mode, &self.vocabulary));
                let mut replies = vec![Reply::Started];
                drain_prompts(session, &mut replies);
                replies
            }
            Event::TextSubmitted(text) => {
                let Some(session) = slot.as_mut() else {
                    return vec![Reply::SelectModeFirst];
                };

                match session.submit_answer(&self.oracle, &text).await {
                    Submission::Ignored(summary) => vec![Reply::Summary(summary)],
                    Submission::Judged(verdict) => {
                        let mut replies = vec![Reply::Verdict(verdict)];
                        drain_prompts(session, &mut replies);
                        replies
                    }
                }
            }
        }
    }
}

/// Emit display-only prompts until an answer is needed or the run ends.
fn drain_prompts(session: &mut Session, replies: &mut Vec<Reply>) {
    loop {
        match session.next_prompt() {
            Step::Show(prompt) => replies.push(Reply::Prompt(prompt)),
            Step::Ask(prompt) => {
                replies.push(Reply::Prompt(prompt));
                return;
            }
            Step::Finished(summary) => {
                replies.push(Reply::Summary(summary));
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::tests::StubLookup;
    use crate::oracle::OracleSettings;
    use crate::session::SessionState;
    use crate::vocabulary::VocabularyEntry;
    use pretty_assertions::assert_eq;

    fn engine() -> QuizEngine<crate::oracle::NoSynonyms> {
        let vocabulary = Vocabulary::from_pairs([("cat", "кот"), ("dog", "собака")]);
        QuizEngine::new(Arc::new(vocabulary), Oracle::offline())
    }

    fn rendered(replies: &[Reply]) -> Vec<String> {
        replies.iter().map(|r| r.to_string()).collect()
    }

    #[tokio::test]
    async fn text_without_session() {
        let engine = engine();
        let mut slot = None;
        let replies = engine
            .handle(&mut slot, Event::TextSubmitted("кот".to_string()))
            .await;
        assert_eq!(replies, vec![Reply::SelectModeFirst]);
        assert!(slot.is_none());
    }

    #[tokio::test]
    async fn present_mode_streams_everything() {
        let engine = engine();
        let mut slot = None;
        let replies = engine
            .handle(&mut slot, Event::ModeSelected(Mode::Present))
            .await;

        assert_eq!(replies.len(), 4);
        assert_eq!(replies[0], Reply::Started);
        assert!(matches!(replies[1], Reply::Prompt(_)));
        assert!(matches!(replies[2], Reply::Prompt(_)));
        assert_eq!(rendered(&replies)[3], "Done.\nCorrect: 0/2");
        assert_eq!(SessionState::of(slot.as_ref()), SessionState::Complete);
    }

    #[tokio::test]
    async fn present_mode_handles_large_vocabulary() {
        let vocabulary =
            Vocabulary::from_pairs((0..10_000).map(|i| (format!("w{}", i), format!("с{}", i))));
        let engine = QuizEngine::new(Arc::new(vocabulary), Oracle::offline());
        let mut slot = None;

        let replies = engine
            .handle(&mut slot, Event::ModeSelected(Mode::Present))
            .await;
        assert_eq!(replies.len(), 10_002);
    }

    #[tokio::test]
    async fn quiz_round_trip() {
        let engine = engine();
        let mut slot = Some(Session::from_sequence(
            Mode::Quiz,
            vec![
                VocabularyEntry::new("cat", "кот"),
                VocabularyEntry::new("dog", "собака"),
            ],
        ));

        let replies = engine
            .handle(&mut slot, Event::TextSubmitted("кот".to_string()))
            .await;
        assert_eq!(rendered(&replies), vec!["✓ Correct", "dog — ?"]);

        let replies = engine
            .handle(&mut slot, Event::TextSubmitted("собака".to_string()))
            .await;
        assert_eq!(rendered(&replies), vec!["✓ Correct", "Done.\nCorrect: 2/2"]);

        let replies = engine
            .handle(&mut slot, Event::TextSubmitted("again".to_string()))
            .await;
        assert_eq!(rendered(&replies), vec!["Done.\nCorrect: 2/2"]);
    }

    #[tokio::test]
    async fn mode_selection_starts_with_first_question() {
        let engine = engine();
        let mut slot = None;
        let replies = engine
            .handle(&mut slot, Event::ModeSelected(Mode::Examine))
            .await;

        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], Reply::Started);
        let question = replies[1].to_string();
        assert!(question == "кот — ?" || question == "собака — ?");
    }

    #[tokio::test]
    async fn reselecting_mode_discards_progress() {
        let engine = engine();
        let mut slot = None;
        engine.handle(&mut slot, Event::ModeSelected(Mode::Quiz)).await;
        engine
            .handle(&mut slot, Event::TextSubmitted("кот".to_string()))
            .await;
        assert_eq!(slot.as_ref().map(Session::position), Some(1));

        engine.handle(&mut slot, Event::ModeSelected(Mode::Examine)).await;
        let session = slot.as_ref().unwrap();
        assert_eq!(session.mode(), Mode::Examine);
        assert_eq!(session.position(), 0);
        assert_eq!(session.score(), 0);
    }

    #[tokio::test]
    async fn empty_vocabulary_reports_zero_of_zero() {
        let engine = QuizEngine::new(Arc::new(Vocabulary::default()), Oracle::offline());
        for mode in Mode::ALL {
            let mut slot = None;
            let replies = engine.handle(&mut slot, Event::ModeSelected(mode)).await;
            assert_eq!(
                replies,
                vec![Reply::Started, Reply::Summary(Summary { score: 0, total: 0 })]
            );
        }
    }

    #[tokio::test]
    async fn synonym_reply_rendering() {
        let vocabulary = Vocabulary::from_pairs([("big", "большой")]);
        let oracle = Oracle::new(
            StubLookup::with("большой", &["крупный"]),
            OracleSettings::default(),
        );
        let engine = QuizEngine::new(Arc::new(vocabulary), oracle);
        let mut slot = None;

        engine.handle(&mut slot, Event::ModeSelected(Mode::Quiz)).await;
        let replies = engine
            .handle(&mut slot, Event::TextSubmitted("крупный".to_string()))
            .await;
        assert_eq!(
            rendered(&replies),
            vec!["✓ Correct (online synonym)", "Done.\nCorrect: 1/1"]
        );
    }
}
