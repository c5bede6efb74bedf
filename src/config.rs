use crate::error::{Error, Result};
use crate::keybindings::{Keybindings, KeybindingsConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Highest accepted volume for crackles and chimes.
pub const MAX_VOLUME: u8 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub speech: SpeechConfig,

    /// Timing of the clipboard-mediated line capture
    #[serde(default)]
    pub side_channel: SideChannelConfig,

    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Volume of the crackle played for skipped levels (0-100)
    #[serde(default = "default_crackle_volume")]
    pub crackle_volume: u8,

    /// Volume of the chime played when no target exists (0-100)
    #[serde(default = "default_chime_volume")]
    pub chime_volume: u8,

    /// Encode levels as pitches. When disabled every crackle tone uses
    /// the base pitch.
    #[serde(default = "default_pitch_tones")]
    pub pitch_tones: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speak a message in addition to the chime when no target exists
    #[serde(default)]
    pub announce_boundary: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideChannelConfig {
    /// Total time allowed for one clipboard round trip
    #[serde(default = "default_clipboard_timeout_ms")]
    pub clipboard_timeout_ms: u64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            crackle_volume: default_crackle_volume(),
            chime_volume: default_chime_volume(),
            pitch_tones: default_pitch_tones(),
        }
    }
}

impl Default for SideChannelConfig {
    fn default() -> Self {
        Self {
            clipboard_timeout_ms: default_clipboard_timeout_ms(),
        }
    }
}

fn default_crackle_volume() -> u8 {
    25
}

fn default_chime_volume() -> u8 {
    50
}

fn default_pitch_tones() -> bool {
    true
}

fn default_clipboard_timeout_ms() -> u64 {
    1000
}

impl AudioConfig {
    /// Crackle volume clamped to the valid range
    pub fn crackle_volume(&self) -> u8 {
        self.crackle_volume.min(MAX_VOLUME)
    }

    /// Chime volume clamped to the valid range
    pub fn chime_volume(&self) -> u8 {
        self.chime_volume.min(MAX_VOLUME)
    }
}

impl SideChannelConfig {
    pub fn clipboard_timeout(&self) -> Duration {
        Duration::from_millis(self.clipboard_timeout_ms)
    }
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/indentnav/config.toml
    /// - Linux: ~/.config/indentnav/config.toml
    /// - Windows: %APPDATA%/indentnav/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("indentnav").join("config.toml"))
    }

    /// Load config from the default location, or return defaults if the file
    /// is missing or unreadable
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| Self::load_from(&path).ok())
            .unwrap_or_default()
    }

    /// Load config from an explicit path, reporting any failure
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;
        self.save_to(&path)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        Ok(())
    }

    /// Reject values the settings store would never hold
    pub fn validate(&self) -> Result<()> {
        if self.audio.crackle_volume > MAX_VOLUME {
            return Err(Error::Config(format!(
                "crackle_volume must be 0-{}, got {}",
                MAX_VOLUME, self.audio.crackle_volume
            )));
        }
        if self.audio.chime_volume > MAX_VOLUME {
            return Err(Error::Config(format!(
                "chime_volume must be 0-{}, got {}",
                MAX_VOLUME, self.audio.chime_volume
            )));
        }
        if self.side_channel.clipboard_timeout_ms == 0 {
            return Err(Error::Config(
                "clipboard_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Keybindings::new().merge(&self.keybindings)?;
        Ok(())
    }

    /// Get keybindings with user customizations applied
    pub fn keybindings(&self) -> Keybindings {
        self.keybindings.to_keybindings()
    }
}
