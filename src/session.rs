//! Per-command driver.
//!
//! A [`Session`] owns the long-lived collaborators (configuration, audio,
//! speech, repeat tracking). Each command gets a freshly acquired level
//! source, which is released again whatever the scan did.

use crate::audio::{AudioEncoder, TonePlayer};
use crate::commands::NavCommand;
use crate::config::Config;
use crate::error::Result;
use crate::keybindings::{Action, REPEAT_WINDOW, RepeatTracker};
use crate::nav::{Feedback, Outcome, navigate};
use crate::source::LevelSource;
use crate::speech::{Speech, Transcript, Utterance};
use crate::workspace::{Position, Workspace};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, warn};

/// One replayed action and everything it produced.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub command: NavCommand,
    /// Times the same action was repeated just before this one.
    pub repeat_count: usize,
    pub outcome: Outcome,
    /// Caret or focus after the command.
    pub position: Position,
    pub spoken: Vec<Utterance>,
}

pub struct Session<P: TonePlayer, S: Speech> {
    config: Config,
    encoder: AudioEncoder<P>,
    speech: S,
    repeats: RepeatTracker,
}

impl<P: TonePlayer, S: Speech> Session<P, S> {
    pub fn new(config: Config, player: P, speech: S) -> Self {
        Self {
            config,
            encoder: AudioEncoder::new(player),
            speech,
            repeats: RepeatTracker::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn player(&self) -> &P {
        self.encoder.player()
    }

    pub fn speech(&self) -> &S {
        &self.speech
    }

    pub fn speech_mut(&mut self) -> &mut S {
        &mut self.speech
    }

    /// Run `command` on an acquired source, then release it.
    ///
    /// A release failure is reported only when the command itself succeeded;
    /// otherwise the command's error wins and the release error is logged.
    pub fn execute<L: LevelSource>(
        &mut self,
        source: &mut L,
        command: NavCommand,
        repeat_count: usize,
    ) -> Result<Outcome> {
        let request = command.request(repeat_count);
        let message = command.boundary_message(source.kind());
        debug!(%command, repeat_count, ?request, "executing");

        let feedback = Feedback {
            encoder: &mut self.encoder,
            speech: &mut self.speech,
            config: &self.config,
        };
        let outcome = navigate(source, &request, message, feedback);
        let released = source.release();

        match (outcome, released) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), released) => {
                if let Err(release_err) = released {
                    warn!(%release_err, "release failed after command error");
                }
                Err(err)
            }
        }
    }

    /// Run `command` against whatever `workspace` hosts.
    pub fn run(
        &mut self,
        workspace: &mut Workspace,
        command: NavCommand,
        repeat_count: usize,
    ) -> Result<Outcome> {
        workspace.run(self, command, repeat_count)
    }

    /// Handle a gesture's action pressed at `now`. Returns `None` for
    /// actions that are not navigation commands.
    pub fn dispatch(
        &mut self,
        workspace: &mut Workspace,
        action: Action,
        now: Instant,
    ) -> Result<Option<Outcome>> {
        let repeat_count = self.repeats.record(action, now);
        let Some(command) = action.command() else {
            return Ok(None);
        };
        self.run(workspace, command, repeat_count).map(Some)
    }
}

impl<P: TonePlayer> Session<P, Transcript> {
    /// Run `actions` back to back, as if pressed in quick succession, and
    /// collect what each one did. Non-navigation actions are skipped.
    pub fn replay(&mut self, workspace: &mut Workspace, actions: &[Action]) -> Result<Vec<Step>> {
        let gap = REPEAT_WINDOW / 5;
        let mut now = Instant::now();
        let mut steps = Vec::new();

        for &action in actions {
            let repeat_count = self.repeats.record(action, now);
            now += gap;
            let Some(command) = action.command() else {
                continue;
            };
            let outcome = self.run(workspace, command, repeat_count)?;
            steps.push(Step {
                command,
                repeat_count,
                outcome,
                position: workspace.position(),
                spoken: self.speech.drain(),
            });
        }
        Ok(steps)
    }
}
