//! Interactive gesture mode.
//!
//! Reads key events from the terminal, looks them up in the gesture table for
//! the workspace's mode and prints what each command would have sounded like.

use super::OutputFormat;
use super::output::{describe_cue, render_gestures};
use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use indentnav::audio::TonePlayer;
use indentnav::keybindings::{Action, KeybindingMode, Keybindings};
use indentnav::nav::Outcome;
use indentnav::session::Session;
use indentnav::speech::{Transcript, Utterance};
use indentnav::workspace::Workspace;
use std::io::{self, Write};
use std::time::Instant;
use tracing::warn;

/// Leaves raw mode when dropped, including on early returns.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(RawMode)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Raw mode needs explicit carriage returns.
fn emit(out: &mut impl Write, text: &str) -> io::Result<()> {
    for line in text.lines() {
        write!(out, "{}\r\n", line)?;
    }
    out.flush()
}

/// Lines describing one command's feedback.
pub fn feedback_lines(outcome: &Outcome, spoken: &[Utterance], line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(cue) = &outcome.cue {
        lines.push(format!("  {}", describe_cue(cue)));
    }
    lines.extend(spoken.iter().map(|u| format!("  says: {}", u.spoken())));
    lines.push(format!("  caret on line {}", line));
    lines
}

pub fn run<P: TonePlayer>(
    session: &mut Session<P, Transcript>,
    workspace: &mut Workspace,
    keybindings: &mut Keybindings,
) -> Result<()> {
    let mut out = io::stdout();
    let mode = KeybindingMode::from(workspace.unit_kind());
    let _raw = RawMode::enable()?;

    emit(
        &mut out,
        &format!(
            "{} mode, line {}: {}\nPress ? for gestures, q to quit.",
            mode.display_name(),
            workspace.position().line,
            workspace.current_text()
        ),
    )?;

    loop {
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let Some(action) = keybindings.dispatch(mode, key) else {
            continue;
        };

        match action {
            Action::Quit => break,
            Action::ToggleHelp => {
                emit(&mut out, &render_gestures(keybindings, OutputFormat::Plain)?)?;
            }
            _ => {
                emit(&mut out, &format!("{}:", action.description()))?;
                match session.dispatch(workspace, action, Instant::now()) {
                    Ok(Some(outcome)) => {
                        let spoken = session.speech_mut().drain();
                        let lines = feedback_lines(&outcome, &spoken, workspace.position().line);
                        emit(&mut out, &lines.join("\n"))?;
                    }
                    Ok(None) => {}
                    Err(err) => {
                        warn!(%err, %action, "command failed");
                        emit(&mut out, &format!("  error: {}", err))?;
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indentnav::Config;
    use indentnav::audio::RecordingPlayer;

    #[test]
    fn test_feedback_lines() {
        let mut session = Session::new(Config::default(), RecordingPlayer::new(), Transcript::new());
        let mut workspace = Workspace::text("a\n  x\nb", 0);
        let outcome = session
            .dispatch(&mut workspace, Action::NextSibling, Instant::now())
            .unwrap()
            .unwrap();
        let spoken = session.speech_mut().drain();
        let lines = feedback_lines(&outcome, &spoken, workspace.position().line);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("  crackle 1 tone at volume 25"));
        assert_eq!(lines[1], "  says: b");
        assert_eq!(lines[2], "  caret on line 2");
    }

    #[test]
    fn test_emit_uses_crlf() {
        let mut buffer = Vec::new();
        emit(&mut buffer, "one\ntwo").unwrap();
        assert_eq!(buffer, b"one\r\ntwo\r\n");
    }
}
