//! Tone player collaborators.

use super::tone;

/// Sink for PCM buffers. Feeding a buffer queues it after whatever is still
/// playing; `stop` discards the queue.
pub trait TonePlayer {
    fn stop(&mut self);

    fn feed(&mut self, samples: &[i16]);
}

impl<P: TonePlayer + ?Sized> TonePlayer for &mut P {
    fn stop(&mut self) {
        (**self).stop();
    }

    fn feed(&mut self, samples: &[i16]) {
        (**self).feed(samples);
    }
}

/// Keeps what would have been played.
///
/// `queued` mirrors the player queue: `stop` clears it. `fed` keeps every
/// buffer ever fed, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    queued: Vec<Vec<i16>>,
    fed: Vec<Vec<i16>>,
    stops: usize,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queued(&self) -> &[Vec<i16>] {
        &self.queued
    }

    pub fn fed(&self) -> &[Vec<i16>] {
        &self.fed
    }

    pub fn stops(&self) -> usize {
        self.stops
    }

    /// Total queued playback time in milliseconds.
    pub fn queued_ms(&self) -> u64 {
        let frames: usize = self.queued.iter().map(|b| b.len() / tone::CHANNELS).sum();
        frames as u64 * 1000 / u64::from(tone::SAMPLE_RATE)
    }
}

impl TonePlayer for RecordingPlayer {
    fn stop(&mut self) {
        self.stops += 1;
        self.queued.clear();
    }

    fn feed(&mut self, samples: &[i16]) {
        self.queued.push(samples.to_vec());
        self.fed.push(samples.to_vec());
    }
}
