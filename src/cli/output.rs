//! Rendering replay results.

use super::OutputFormat;
use color_eyre::Result;
use indentnav::audio::Cue;
use indentnav::keybindings::{KeybindingMode, Keybindings};
use indentnav::session::Step;
use indentnav::source::SourceKind;
use indentnav::workspace::Position;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct Report {
    pub source: SourceKind,
    pub start: Position,
    pub steps: Vec<Step>,
}

pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(render_plain(report)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}

fn describe_position(position: &Position) -> String {
    match &position.label {
        Some(label) => format!("\"{}\" (line {})", label, position.line),
        None => format!("line {}", position.line),
    }
}

pub fn describe_cue(cue: &Cue) -> String {
    match cue {
        Cue::Crackle {
            frequencies,
            volume,
        } => {
            let tones: Vec<String> = frequencies.iter().map(|f| format!("{:.0}", f)).collect();
            format!(
                "crackle {} tone{} at volume {}: {} Hz",
                frequencies.len(),
                if frequencies.len() == 1 { "" } else { "s" },
                volume,
                tones.join(" ")
            )
        }
        Cue::Chord {
            frequencies,
            duration_ms,
            volume,
        } => {
            let notes: Vec<String> = frequencies.iter().map(u32::to_string).collect();
            format!(
                "chime {} Hz for {} ms at volume {}",
                notes.join(" + "),
                duration_ms,
                volume
            )
        }
    }
}

pub fn render_plain(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "start: {} ({})",
        describe_position(&report.start),
        report.source
    );

    for (i, step) in report.steps.iter().enumerate() {
        let repeat = if step.repeat_count > 0 {
            format!(" (repeat {})", step.repeat_count)
        } else {
            String::new()
        };
        let result = if step.outcome.found {
            "found"
        } else {
            "not found"
        };
        let _ = writeln!(
            out,
            "[{}] {}{}: {}, now at {}",
            i + 1,
            step.command,
            repeat,
            result,
            describe_position(&step.position)
        );
        if let Some(cue) = &step.outcome.cue {
            let _ = writeln!(out, "    {}", describe_cue(cue));
        }
        for utterance in &step.spoken {
            let _ = writeln!(out, "    says: {}", utterance.spoken());
        }
    }
    out
}

/// Gesture table for `--list-gestures`.
pub fn render_gestures(keybindings: &Keybindings, format: OutputFormat) -> Result<String> {
    #[derive(Serialize)]
    struct Entry {
        mode: KeybindingMode,
        action: String,
        keys: Vec<String>,
        description: &'static str,
    }

    let mut entries = Vec::new();
    for mode in [KeybindingMode::Editable, KeybindingMode::Tree] {
        for (action, keys) in keybindings.help_entries(mode) {
            entries.push(Entry {
                mode,
                action: action.to_string(),
                keys,
                description: action.description(),
            });
        }
    }

    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&entries)?),
        OutputFormat::Plain => {
            let mut out = String::new();
            let mut current = None;
            for entry in &entries {
                if current != Some(entry.mode) {
                    let _ = writeln!(out, "{}:", entry.mode.display_name());
                    current = Some(entry.mode);
                }
                let _ = writeln!(
                    out,
                    "  {:<18} {:<22} {}",
                    entry.keys.join(", "),
                    entry.action,
                    entry.description
                );
            }
            Ok(out)
        }
    }
}
