//! PCM tone synthesis.
//!
//! Buffers are interleaved 16-bit stereo at [`SAMPLE_RATE`]: left sample first,
//! then right.

use std::f64::consts::TAU;

pub const SAMPLE_RATE: u32 = 44_100;
pub const CHANNELS: usize = 2;

/// Highest accepted channel volume.
pub const MAX_VOLUME: u8 = 100;

/// Number of stereo frames in `duration_ms` milliseconds.
pub fn frames_for(duration_ms: u32) -> usize {
    SAMPLE_RATE as usize * duration_ms as usize / 1000
}

fn amplitude(volume: u8) -> f64 {
    f64::from(i16::MAX) * f64::from(volume.min(MAX_VOLUME)) / f64::from(MAX_VOLUME)
}

/// Sine tone at `freq` Hz with independent channel volumes (0-100).
pub fn generate_beep(freq: f64, duration_ms: u32, left: u8, right: u8) -> Vec<i16> {
    let frames = frames_for(duration_ms);
    let (left, right) = (amplitude(left), amplitude(right));
    let step = TAU * freq / f64::from(SAMPLE_RATE);

    let mut samples = Vec::with_capacity(frames * CHANNELS);
    for n in 0..frames {
        let wave = (step * n as f64).sin();
        samples.push((wave * left).round() as i16);
        samples.push((wave * right).round() as i16);
    }
    samples
}

pub fn silence(duration_ms: u32) -> Vec<i16> {
    vec![0; frames_for(duration_ms) * CHANNELS]
}

/// Sum buffers sample by sample, saturating at the i16 range.
/// The result is as long as the longest input.
pub fn mix(buffers: &[Vec<i16>]) -> Vec<i16> {
    let len = buffers.iter().map(Vec::len).max().unwrap_or(0);
    let mut mixed = vec![0i16; len];
    for buffer in buffers {
        for (out, sample) in mixed.iter_mut().zip(buffer) {
            *out = out.saturating_add(*sample);
        }
    }
    mixed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beep_length() {
        let beep = generate_beep(440.0, 10, 50, 50);
        assert_eq!(beep.len(), 441 * CHANNELS);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let beep = generate_beep(440.0, 10, 0, 0);
        assert!(beep.iter().all(|&s| s == 0));
    }

    #[test]
    fn test_channel_volumes_are_independent() {
        let beep = generate_beep(440.0, 10, 100, 0);
        let left_peak = beep.iter().step_by(2).map(|s| s.unsigned_abs()).max();
        let right_peak = beep.iter().skip(1).step_by(2).map(|s| s.unsigned_abs()).max();
        assert!(left_peak.unwrap_or(0) > 30_000);
        assert_eq!(right_peak, Some(0));
    }

    #[test]
    fn test_volume_above_max_is_clamped() {
        assert_eq!(generate_beep(440.0, 5, 255, 255), generate_beep(440.0, 5, 100, 100));
    }

    #[test]
    fn test_mix_saturates_and_pads() {
        let mixed = mix(&[vec![i16::MAX, 1, 2], vec![100, 1]]);
        assert_eq!(mixed, vec![i16::MAX, 2, 2]);
    }

    #[test]
    fn test_silence() {
        assert_eq!(silence(5), vec![0; frames_for(5) * CHANNELS]);
    }
}
