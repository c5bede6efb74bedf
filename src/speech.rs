//! Speech output collaborator.

use serde::Serialize;

/// Text-to-speech sink.
pub trait Speech {
    /// Read a line of text.
    fn speak(&mut self, text: &str);

    /// Announce a focused object, e.g. a tree item with its depth.
    fn speak_object(&mut self, label: &str, level: Option<usize>);

    /// Short status message, such as a boundary notice.
    fn message(&mut self, text: &str);
}

impl<S: Speech + ?Sized> Speech for &mut S {
    fn speak(&mut self, text: &str) {
        (**self).speak(text);
    }

    fn speak_object(&mut self, label: &str, level: Option<usize>) {
        (**self).speak_object(label, level);
    }

    fn message(&mut self, text: &str) {
        (**self).message(text);
    }
}

/// One call made on a [`Speech`] sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Utterance {
    Text { text: String },
    Object { label: String, level: Option<usize> },
    Message { text: String },
}

impl Utterance {
    /// What a screen reader would say.
    pub fn spoken(&self) -> String {
        match self {
            Utterance::Text { text } | Utterance::Message { text } => text.clone(),
            Utterance::Object {
                label,
                level: Some(level),
            } => format!("{label}, level {level}"),
            Utterance::Object { label, level: None } => label.clone(),
        }
    }
}

/// Speech sink that records what it was asked to say.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    utterances: Vec<Utterance>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utterances(&self) -> &[Utterance] {
        &self.utterances
    }

    /// Take everything recorded so far.
    pub fn drain(&mut self) -> Vec<Utterance> {
        std::mem::take(&mut self.utterances)
    }
}

impl Speech for Transcript {
    fn speak(&mut self, text: &str) {
        self.utterances.push(Utterance::Text {
            text: text.to_string(),
        });
    }

    fn speak_object(&mut self, label: &str, level: Option<usize>) {
        self.utterances.push(Utterance::Object {
            label: label.to_string(),
            level,
        });
    }

    fn message(&mut self, text: &str) {
        self.utterances.push(Utterance::Message {
            text: text.to_string(),
        });
    }
}
