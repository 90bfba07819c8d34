//! RMS-based silence detection.

use crate::audio::{AudioBuffer, SignalWindower};
use crate::config::DetectionConfig;
use serde::Serialize;

/// Outcome of [`SilenceDetector::detect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SilenceDetectionResult {
    pub detected: bool,
    /// Start of the first qualifying silent run, in seconds.
    pub start_time: f64,
    /// Length of that run within the analysed audio, in seconds.
    pub duration: f64,
}

impl SilenceDetectionResult {
    pub fn not_detected() -> Self {
        Self {
            detected: false,
            start_time: 0.0,
            duration: 0.0,
        }
    }
}

/// Finds the first run of low-energy chunks lasting at least
/// `min_silence_duration`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilenceDetector;

impl SilenceDetector {
    pub fn detect(
        &self,
        buffer: &AudioBuffer<'_>,
        config: &DetectionConfig,
    ) -> SilenceDetectionResult {
        let windower = SignalWindower::new(*buffer, config.analysis_window);
        if windower.full_chunk_count() == 0 {
            tracing::debug!(
                samples = buffer.len(),
                chunk_len = windower.chunk_len(),
                "buffer shorter than one analysis chunk, skipping silence detection"
            );
            return SilenceDetectionResult::not_detected();
        }

        let min_len = buffer.samples_for(config.min_silence_duration);
        // (run start offset, run end offset)
        let mut run: Option<(usize, usize)> = None;
        let mut qualified = false;

        for chunk in windower.chunks() {
            let silent = calculate_rms(chunk.samples) < config.silence_threshold;

            if silent {
                let (start, _) = run.unwrap_or((chunk.offset, chunk.offset));
                run = Some((start, chunk.end_offset()));
                if !qualified && chunk.end_offset() - start >= min_len {
                    qualified = true;
                }
            } else if qualified {
                break;
            } else {
                run = None;
            }
        }

        match run {
            Some((start, end)) if qualified => {
                let result = SilenceDetectionResult {
                    detected: true,
                    start_time: buffer.time_at(start),
                    duration: (end - start) as f64 / buffer.sample_rate() as f64,
                };
                tracing::debug!(
                    start = result.start_time,
                    duration = result.duration,
                    "silence detected"
                );
                result
            }
            _ => SilenceDetectionResult::not_detected(),
        }
    }
}

/// Calculates the Root Mean Square (RMS) of normalized samples.
///
/// Returns 0.0 for an empty slice; a full-scale sine gives ~0.707.
pub fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples
        .iter()
        .map(|&sample| {
            let sample = sample as f64;
            sample * sample
        })
        .sum();

    let mean_square = sum_squares / samples.len() as f64;
    mean_square.sqrt() as f32
}
