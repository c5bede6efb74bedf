use clap::{Parser, ValueEnum};
use indentnav::Config;
use indentnav::commands::NavCommand;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "indentnav")]
#[command(version)]
#[command(about = "Navigate text by indentation level and trees by depth")]
#[command(
    long_about = "indentnav - structural navigation by indentation or tree level.\n\n\
    Runs navigation commands against a document and reports what a screen reader\n\
    user would hear: the spoken line, the crackle of skipped levels, and the\n\
    boundary chime when nothing is found.\n\n\
    Examples:\n  \
    indentnav src/main.py --line 3 next-sibling        # One command\n  \
    indentnav src/main.py -n 9 speak-parent speak-parent # Walk two levels up\n  \
    indentnav notes.md --mode tree --keys 'Alt+Right Alt+Down'\n  \
    indentnav app.py --mode editor -o json parent     # Clipboard side channel\n  \
    indentnav app.py -i                               # Interactive gestures"
)]
pub struct Cli {
    /// Document to navigate
    #[arg(value_hint = clap::ValueHint::FilePath, required_unless_present = "list_gestures")]
    pub file: Option<PathBuf>,

    /// Commands to run in order
    ///
    /// next-sibling, previous-sibling, next-sibling-force, previous-sibling-force,
    /// last-sibling, first-sibling, child, parent, speak-parent
    #[arg(value_name = "COMMAND")]
    pub commands: Vec<NavCommand>,

    /// Replay gestures instead of commands, e.g. "Alt+Down Alt+i Alt+i"
    ///
    /// Gestures are pressed in quick succession, so repeated "speak parent"
    /// gestures walk further up.
    #[arg(short = 'k', long = "keys", value_name = "GESTURES", conflicts_with = "commands")]
    pub keys: Option<String>,

    /// Read gestures from the terminal
    #[arg(short = 'i', long = "interactive", conflicts_with_all = ["commands", "keys"])]
    pub interactive: bool,

    /// 0-based line the caret starts on
    #[arg(short = 'n', long = "line", visible_alias = "at", default_value_t = 0)]
    pub line: usize,

    /// Host the document is opened in
    #[arg(short = 'm', long = "mode", default_value = "text")]
    pub mode: Mode,

    /// Output format
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Crackle volume (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub crackle_volume: Option<u8>,

    /// Boundary chime volume (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub chime_volume: Option<u8>,

    /// Speak a message when no target exists
    #[arg(long)]
    pub announce_boundary: bool,

    /// Crackle at a single pitch in editable text
    #[arg(long)]
    pub flat_tones: bool,

    /// In editor mode, go through the system clipboard
    #[arg(long)]
    pub system_clipboard: bool,

    /// Config file (default: platform config dir)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the gesture table and exit
    #[arg(long)]
    pub list_gestures: bool,

    /// Enable debug logging
    #[arg(short = 'v', long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply flag overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(volume) = self.crackle_volume {
            config.audio.crackle_volume = volume;
        }
        if let Some(volume) = self.chime_volume {
            config.audio.chime_volume = volume;
        }
        if self.announce_boundary {
            config.speech.announce_boundary = true;
        }
        if self.flat_tones {
            config.audio.pitch_tones = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Editable text with a native caret
    Text,
    /// Code editor driven through keystrokes and the clipboard
    Editor,
    /// Tree view of the markdown headings
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}
