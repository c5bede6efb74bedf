//! Audio cues for navigation.
//!
//! A *crackle* is a burst of short tones, one per level skipped during a scan.
//! Pitch rises a quarter tone per level, so deeper blocks sound higher. Long
//! histories are thinned to fit a fixed time budget.
//!
//! The *boundary chime* is a two-note chord played when a scan finds nothing.

mod player;
pub mod tone;

pub use player::{RecordingPlayer, TonePlayer};

use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use tracing::trace;

/// Pitch of level 0, and reference note `A` of the chord table.
pub const BASE_FREQ: f64 = 220.0;

/// Length of one crackle tone.
pub const BEEP_LEN_MS: u32 = 10;
/// Silence after each crackle tone.
pub const PAUSE_LEN_MS: u32 = 5;
/// Upper bound on the audible part of a crackle.
pub const MAX_CRACKLE_MS: u32 = 400;
/// Most tones a crackle will play.
pub const MAX_BEEP_COUNT: usize = (MAX_CRACKLE_MS / BEEP_LEN_MS) as usize;

/// Chord played when a scan hits a boundary.
pub const BOUNDARY_CHORD: &str = "HF";
pub const BOUNDARY_CHIME_MS: u32 = 100;

/// Chromatic scale starting at A, German naming (`B` is B flat, `H` is B).
pub const NOTES: [&str; 12] = ["A", "B", "H", "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#"];

/// Frequency of a crackle tone for `level`: 24 quarter tones per octave.
///
/// ```
/// # use indentnav::audio::pitch;
/// assert_eq!(pitch(0), 220.0);
/// assert_eq!(pitch(24), 440.0);
/// ```
pub fn pitch(level: usize) -> f64 {
    BASE_FREQ * 2f64.powf(level as f64 / 24.0)
}

/// Pick `m` items spread evenly over `items`, always including the first.
/// Inputs of at most `m` items come back unchanged.
pub fn uniform_sample<T: Copy>(items: &[T], m: usize) -> Vec<T> {
    let n = items.len();
    if n <= m {
        return items.to_vec();
    }
    (0..m).map(|k| items[k * n / m]).collect()
}

/// Frequencies of the notes named in `chord`, e.g. `"HF"`.
///
/// Each note is placed at or above the previous one, going up an octave when
/// needed, so the result never descends.
pub fn chord_frequencies(chord: &str) -> Result<Vec<u32>> {
    static NOTE: OnceLock<Regex> = OnceLock::new();
    let note = NOTE.get_or_init(|| Regex::new(r"[A-H]#?").expect("note pattern is valid"));

    let mut previous = 0;
    let mut frequencies = Vec::new();
    for name in note.find_iter(chord).map(|m| m.as_str()) {
        let mut index = NOTES
            .iter()
            .position(|n| *n == name)
            .ok_or_else(|| Error::UnknownNote(name.to_string()))?;
        while index < previous {
            index += NOTES.len();
        }
        frequencies.push((BASE_FREQ * 2f64.powf(index as f64 / 12.0)).floor() as u32);
        previous = index;
    }
    Ok(frequencies)
}

/// What was played, for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum Cue {
    Crackle {
        /// Tone frequencies in play order, after sampling.
        frequencies: Vec<f64>,
        volume: u8,
    },
    Chord {
        frequencies: Vec<u32>,
        duration_ms: u32,
        volume: u8,
    },
}

/// Turns level histories and boundaries into sound on a [`TonePlayer`].
///
/// Every cue stops whatever is still playing before it starts.
#[derive(Debug, Default)]
pub struct AudioEncoder<P: TonePlayer> {
    player: P,
}

impl<P: TonePlayer> AudioEncoder<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Play one tone per level. With `pitch_tones` off every tone uses the
    /// level-0 pitch, so only the count is audible. Nothing happens for an
    /// empty history.
    pub fn crackle(&mut self, levels: &[usize], volume: u8, pitch_tones: bool) -> Option<Cue> {
        if levels.is_empty() {
            return None;
        }

        let levels = if pitch_tones {
            uniform_sample(levels, MAX_BEEP_COUNT)
        } else {
            vec![0; levels.len().min(MAX_BEEP_COUNT)]
        };
        let frequencies: Vec<f64> = levels.iter().map(|&level| pitch(level)).collect();

        let pause = tone::silence(PAUSE_LEN_MS);
        let mut buffer = Vec::new();
        for &freq in &frequencies {
            buffer.extend(tone::generate_beep(freq, BEEP_LEN_MS, volume, volume));
            buffer.extend_from_slice(&pause);
        }

        trace!(tones = frequencies.len(), volume, "crackle");
        self.player.stop();
        self.player.feed(&buffer);
        Some(Cue::Crackle { frequencies, volume })
    }

    /// Play the notes of `chord` together for `duration_ms`.
    pub fn chord(&mut self, chord: &str, duration_ms: u32, left: u8, right: u8) -> Result<Cue> {
        let frequencies = chord_frequencies(chord)?;
        let voices: Vec<Vec<i16>> = frequencies
            .iter()
            .map(|&freq| tone::generate_beep(f64::from(freq), duration_ms, left, right))
            .collect();

        self.player.stop();
        self.player.feed(&tone::mix(&voices));
        Ok(Cue::Chord {
            frequencies,
            duration_ms,
            volume: left.max(right),
        })
    }

    /// The "nothing found" chime.
    pub fn boundary_chime(&mut self, volume: u8) -> Result<Cue> {
        self.chord(BOUNDARY_CHORD, BOUNDARY_CHIME_MS, volume, volume)
    }
}
