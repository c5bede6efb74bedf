//! Structural navigation.
//!
//! A [`ScanRequest`] describes one move: which way to go, which level
//! comparison accepts a unit, whether the move may leave the current block,
//! and how many accepted units to pass. [`scan`] runs it against a
//! [`LevelSource`]; [`navigate`] additionally relocates the caret, plays the
//! audio cue and speaks the result.

mod scan;

pub use scan::scan;

use crate::audio::{AudioEncoder, Cue, TonePlayer};
use crate::config::Config;
use crate::error::Result;
use crate::source::{Direction, LevelSource, UnitKind};
use crate::speech::Speech;
use serde::Serialize;
use tracing::debug;

/// Level predicate, applied as `new <op> current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Same level: siblings.
    Equal,
    /// Deeper: children.
    Greater,
    /// Shallower: parents and ancestors.
    Less,
}

impl Comparison {
    pub fn matches(self, new: usize, current: usize) -> bool {
        match self {
            Comparison::Equal => new == current,
            Comparison::Greater => new > current,
            Comparison::Less => new < current,
        }
    }
}

/// Repeat count used by the first/last sibling moves.
pub const REPEAT_TO_END: usize = 1000;

/// One navigation move.
///
/// ```
/// # use indentnav::nav::{Comparison, ScanRequest};
/// # use indentnav::source::Direction;
/// let last_sibling = ScanRequest::new(Direction::Forward, Comparison::Equal)
///     .bounded()
///     .repeat(1000);
/// assert!(last_sibling.bounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanRequest {
    pub direction: Direction,
    pub comparison: Comparison,
    /// Stop at the end of the current block instead of crossing into a
    /// shallower one.
    pub bounded: bool,
    /// Number of accepted units to pass; at least 1.
    pub repeat: usize,
    /// Report the target without moving the caret.
    pub speak_only: bool,
}

impl ScanRequest {
    pub const fn new(direction: Direction, comparison: Comparison) -> Self {
        Self {
            direction,
            comparison,
            bounded: false,
            repeat: 1,
            speak_only: false,
        }
    }

    pub const fn bounded(mut self) -> Self {
        self.bounded = true;
        self
    }

    pub const fn repeat(mut self, count: usize) -> Self {
        self.repeat = if count == 0 { 1 } else { count };
        self
    }

    pub const fn speak_only(mut self) -> Self {
        self.speak_only = true;
        self
    }
}

/// An accepted unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<P> {
    pub position: P,
    pub level: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult<P> {
    Found(Match<P>),
    NotFound,
}

/// A finished scan: the result and the levels walked over on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan<P> {
    pub result: ScanResult<P>,
    pub history: Vec<usize>,
}

/// Where [`navigate`] sends its feedback.
pub struct Feedback<'a, P: TonePlayer, S: Speech> {
    pub encoder: &'a mut AudioEncoder<P>,
    pub speech: &'a mut S,
    pub config: &'a Config,
}

/// What a navigation command did, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    pub history: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cue: Option<Cue>,
    pub relocated: bool,
    /// Boundary message, when one was announced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Run `request` and give the user feedback.
///
/// On a match the caret moves there (unless the request is speak-only), the
/// history plays as a crackle and the matched unit is spoken. Otherwise the
/// boundary chime plays, followed by `boundary_message` when boundary
/// announcements are enabled.
///
/// The source is left acquired; releasing it is up to the caller.
pub fn navigate<L, P, S>(
    source: &mut L,
    request: &ScanRequest,
    boundary_message: &str,
    feedback: Feedback<'_, P, S>,
) -> Result<Outcome>
where
    L: LevelSource,
    P: TonePlayer,
    S: Speech,
{
    let Feedback {
        encoder,
        speech,
        config,
    } = feedback;
    let kind = source.kind();
    let Scan { result, history } = scan(source, request)?;

    match result {
        ScanResult::Found(found) => {
            let relocated = !request.speak_only;
            if relocated {
                source.relocate_to(&found.position)?;
            }
            debug!(position = ?found.position, level = found.level, relocated, "found");

            // Tree views always get pitch-coded tones
            let pitch_tones = kind == UnitKind::Tree || config.audio.pitch_tones;
            let cue = encoder.crackle(&history, config.audio.crackle_volume(), pitch_tones);

            match kind {
                UnitKind::Editable => speech.speak(&found.text),
                // Stands in for the host's own focus announcement after
                // relocation, and is the only announcement when speak-only.
                UnitKind::Tree => speech.speak_object(&found.text, Some(found.level)),
            }

            Ok(Outcome {
                found: true,
                text: Some(found.text),
                level: Some(found.level),
                history,
                cue,
                relocated,
                message: None,
            })
        }
        ScanResult::NotFound => {
            debug!(boundary_message, "not found");
            let cue = encoder.boundary_chime(config.audio.chime_volume())?;
            let message = config.speech.announce_boundary.then(|| {
                speech.message(boundary_message);
                boundary_message.to_string()
            });

            Ok(Outcome {
                found: false,
                text: None,
                level: None,
                history,
                cue: Some(cue),
                relocated: false,
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingPlayer;
    use crate::host::{LineBuffer, Outline};
    use crate::source::{DirectSource, TreeSource};
    use crate::speech::{Transcript, Utterance};

    const DOC: &str = "def f():\n  a=1\n  b=2\nc=3";

    struct Harness {
        encoder: AudioEncoder<RecordingPlayer>,
        transcript: Transcript,
        config: Config,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                encoder: AudioEncoder::new(RecordingPlayer::new()),
                transcript: Transcript::new(),
                config: Config::default(),
            }
        }

        fn run_text(&mut self, buffer: &mut LineBuffer, request: ScanRequest, message: &str) -> Outcome {
            let mut source = DirectSource::acquire(buffer).unwrap();
            let feedback = Feedback {
                encoder: &mut self.encoder,
                speech: &mut self.transcript,
                config: &self.config,
            };
            navigate(&mut source, &request, message, feedback).unwrap()
        }
    }

    #[test]
    fn test_comparisons() {
        assert!(Comparison::Equal.matches(2, 2));
        assert!(Comparison::Greater.matches(3, 2));
        assert!(!Comparison::Greater.matches(2, 2));
        assert!(Comparison::Less.matches(0, 2));
    }

    #[test]
    fn test_repeat_is_at_least_one() {
        let request = ScanRequest::new(Direction::Forward, Comparison::Equal).repeat(0);
        assert_eq!(request.repeat, 1);
    }

    #[test]
    fn test_found_moves_caret_and_speaks() {
        let mut harness = Harness::new();
        let mut buffer = LineBuffer::new(DOC, 1);
        let request = ScanRequest::new(Direction::Forward, Comparison::Equal).bounded();
        let outcome = harness.run_text(&mut buffer, request, "No next line within indentation block");

        assert!(outcome.found);
        assert!(outcome.relocated);
        assert_eq!(buffer.caret_line(), 2);
        assert_eq!(outcome.cue, None);
        assert_eq!(
            harness.transcript.utterances(),
            &[Utterance::Text { text: "  b=2".into() }]
        );
    }

    #[test]
    fn test_speak_only_keeps_caret() {
        let mut harness = Harness::new();
        let mut buffer = LineBuffer::new(DOC, 2);
        let request = ScanRequest::new(Direction::Backward, Comparison::Less).speak_only();
        let outcome = harness.run_text(&mut buffer, request, "No parent of indentation block");

        assert!(outcome.found);
        assert!(!outcome.relocated);
        assert_eq!(buffer.caret_line(), 2);
        assert_eq!(outcome.text.as_deref(), Some("def f():"));
        assert!(matches!(outcome.cue, Some(Cue::Crackle { ref frequencies, .. }) if frequencies.len() == 1));
    }

    #[test]
    fn test_not_found_chimes_silently_by_default() {
        let mut harness = Harness::new();
        let mut buffer = LineBuffer::new(DOC, 2);
        let request = ScanRequest::new(Direction::Forward, Comparison::Equal).bounded();
        let outcome = harness.run_text(&mut buffer, request, "No next line within indentation block");

        assert!(!outcome.found);
        assert_eq!(buffer.caret_line(), 2);
        assert!(matches!(outcome.cue, Some(Cue::Chord { volume: 50, .. })));
        assert_eq!(outcome.message, None);
        assert!(harness.transcript.utterances().is_empty());
    }

    #[test]
    fn test_not_found_announces_when_enabled() {
        let mut harness = Harness::new();
        harness.config.speech.announce_boundary = true;
        let mut buffer = LineBuffer::new(DOC, 3);
        let request = ScanRequest::new(Direction::Backward, Comparison::Less);
        let outcome = harness.run_text(&mut buffer, request, "No parent of indentation block");

        assert_eq!(outcome.message.as_deref(), Some("No parent of indentation block"));
        assert_eq!(
            harness.transcript.utterances(),
            &[Utterance::Message {
                text: "No parent of indentation block".into()
            }]
        );
    }

    #[test]
    fn test_flat_tones_in_text_but_not_in_trees() {
        let mut harness = Harness::new();
        harness.config.audio.pitch_tones = false;

        let mut buffer = LineBuffer::new(DOC, 3);
        let request = ScanRequest::new(Direction::Backward, Comparison::Equal);
        let outcome = harness.run_text(&mut buffer, request, "");
        assert!(
            matches!(outcome.cue, Some(Cue::Crackle { ref frequencies, .. }) if frequencies == &[220.0, 220.0])
        );

        let mut outline = Outline::from_markdown("# A\n## B\n### C\n# D");
        outline.set_focus_index(3);
        let mut source = TreeSource::acquire(&mut outline).unwrap();
        let feedback = Feedback {
            encoder: &mut harness.encoder,
            speech: &mut harness.transcript,
            config: &harness.config,
        };
        let request = ScanRequest::new(Direction::Backward, Comparison::Equal);
        let outcome = navigate(&mut source, &request, "", feedback).unwrap();
        drop(source);

        assert_eq!(outline.focus(), 0);
        match outcome.cue {
            Some(Cue::Crackle { frequencies, .. }) => assert!(frequencies[0] > frequencies[1]),
            other => panic!("expected crackle, got {other:?}"),
        }
        assert_eq!(
            harness.transcript.utterances().last(),
            Some(&Utterance::Object {
                label: "A".into(),
                level: Some(1)
            })
        );
    }
}
