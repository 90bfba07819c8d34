//! Read-only view over a decoded greeting.

use crate::error::{Result, VmdropError};

/// A validated, borrowed sequence of mono samples at a known sample rate.
///
/// The caller owns the sample storage; the engine only reads it. Samples are
/// expected in `[-1.0, 1.0]` (see [`pcm16_to_f32`] for 16-bit PCM input).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioBuffer<'a> {
    samples: &'a [f32],
    sample_rate: u32,
}

impl<'a> AudioBuffer<'a> {
    /// Wraps `samples`, rejecting empty audio, a zero sample rate, and
    /// non-finite samples.
    pub fn new(samples: &'a [f32], sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(VmdropError::invalid_input("sample rate must be non-zero"));
        }
        if samples.is_empty() {
            return Err(VmdropError::invalid_input("audio buffer is empty"));
        }
        if let Some(index) = samples.iter().position(|s| !s.is_finite()) {
            return Err(VmdropError::invalid_input(format!(
                "sample {index} is not a finite number"
            )));
        }
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    pub fn samples(&self) -> &'a [f32] {
        self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty audio.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.time_at(self.samples.len())
    }

    /// Offset in seconds of the sample at `index`.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate as f64
    }

    /// Number of samples spanning `seconds`, rounded to the nearest sample.
    pub fn samples_for(&self, seconds: f64) -> usize {
        (seconds * self.sample_rate as f64).round().max(0.0) as usize
    }

    /// The first `len` samples as a buffer of their own.
    ///
    /// `len` is clamped to `1..=self.len()` so the result stays valid.
    pub fn prefix(&self, len: usize) -> AudioBuffer<'a> {
        let len = len.clamp(1, self.samples.len());
        AudioBuffer {
            samples: &self.samples[..len],
            sample_rate: self.sample_rate,
        }
    }
}

/// Converts signed 16-bit PCM (-32768 to 32767) into `f32` samples in
/// `[-1.0, 1.0)`.
pub fn pcm16_to_f32(samples: &[i16]) -> Vec<f32> {
    samples
        .iter()
        .map(|&sample| sample as f32 / 32768.0)
        .collect()
}
