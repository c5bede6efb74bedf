//! # indentnav
//!
//! Structural navigation by indentation level or tree depth.
//!
//! ## Usage
//!
//! Run commands against a file and see what they would sound like:
//! ```sh
//! indentnav app.py --line 4 next-sibling parent
//! ```
//!
//! Replay gestures against the heading tree of a markdown file:
//! ```sh
//! indentnav README.md --mode tree --keys "Alt+Right Alt+Down"
//! ```
//!
//! Press gestures live:
//! ```sh
//! indentnav app.py -i
//! ```

mod cli;

use clap::Parser;
use cli::output::{Report, render, render_gestures};
use cli::{Cli, Mode};
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use indentnav::audio::RecordingPlayer;
use indentnav::host::SystemClipboard;
use indentnav::keybindings::{Action, KeybindingMode, format_key_input, parse_gestures};
use indentnav::speech::Transcript;
use indentnav::{Config, Session, Workspace};
use std::fs;
use tracing::debug;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    cli::initialize_logging(&args)?;

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load(),
    };
    args.apply_overrides(&mut config);
    config.validate()?;

    let mut keybindings = config.keybindings();

    if args.list_gestures {
        println!("{}", render_gestures(&keybindings, args.output)?.trim_end());
        return Ok(());
    }

    let path = args
        .file
        .as_ref()
        .ok_or_else(|| eyre!("No file given"))?;
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let mut workspace = open_workspace(&args, &content)?;
    debug!(source = %workspace.source_kind(), line = args.line, "opened workspace");

    let mut session = Session::new(config, RecordingPlayer::new(), Transcript::new());

    if args.interactive {
        return cli::interactive::run(&mut session, &mut workspace, &mut keybindings);
    }

    let actions: Vec<Action> = match &args.keys {
        Some(gestures) => {
            let mode = KeybindingMode::from(workspace.unit_kind());
            parse_gestures(gestures)?
                .into_iter()
                .map(|input| {
                    keybindings.dispatch(mode, input.clone()).ok_or_else(|| {
                        eyre!(
                            "Gesture {} is not bound in {} mode",
                            format_key_input(&input),
                            mode.display_name()
                        )
                    })
                })
                .collect::<Result<_>>()?
        }
        None => args.commands.iter().copied().map(Action::from).collect(),
    };

    let start = workspace.position();
    let steps = session.replay(&mut workspace, &actions)?;
    let report = Report {
        source: workspace.source_kind(),
        start,
        steps,
    };
    println!("{}", render(&report, args.output)?.trim_end());
    Ok(())
}

fn open_workspace(args: &Cli, content: &str) -> Result<Workspace> {
    Ok(match args.mode {
        Mode::Text => Workspace::text(content, args.line),
        Mode::Tree => Workspace::tree(content, args.line),
        Mode::Editor if args.system_clipboard => Workspace::editor_with(
            content,
            args.line,
            Box::new(SystemClipboard::new()?),
            Box::new(SystemClipboard::new()?),
        ),
        Mode::Editor => Workspace::editor(content, args.line, ""),
    })
}
