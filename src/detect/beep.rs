//! Spectral beep detection.
//!
//! Each full analysis chunk is Hamming-windowed and transformed with a
//! forward FFT. A chunk is tonal when its strongest non-DC bin lies inside
//! `beep_freq_range` and the main lobe around that bin holds at least
//! `beep_min_peak_ratio` of the chunk's spectral power. A pure tone puts
//! nearly all of its power there; speech and other harmonic sounds spread it
//! over many partials. `beep_min_amplitude` is only a noise floor on top of
//! that. Contiguous tonal chunks form a run; a run is judged
//! once it ends, and the first run whose length falls inside
//! `beep_duration_range` is the beep. Runs that are too short (clicks) or too
//! long (ringback, sustained tones) are discarded and scanning continues.

use crate::audio::{AudioBuffer, SignalWindower};
use crate::config::DetectionConfig;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex;
use serde::Serialize;
use std::f32::consts::PI;

/// Outcome of [`SpectralBeepDetector::detect`].
///
/// Times, frequency and duration are zero unless `detected` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeepDetectionResult {
    pub detected: bool,
    pub start_time: f64,
    pub end_time: f64,
    /// Peak frequency of the strongest chunk in the run, in Hz.
    pub frequency_hz: f32,
    pub duration: f64,
}

impl BeepDetectionResult {
    pub fn not_detected() -> Self {
        Self {
            detected: false,
            start_time: 0.0,
            end_time: 0.0,
            frequency_hz: 0.0,
            duration: 0.0,
        }
    }
}

/// Bins on each side of the peak counted as its main lobe. The Hamming
/// main lobe is four bins wide.
const MAIN_LOBE_BINS: usize = 2;

/// Spectral peak of one chunk.
#[derive(Debug, Clone, Copy)]
struct Peak {
    frequency_hz: f32,
    amplitude: f32,
    /// Share of the chunk's non-DC power inside the peak's main lobe.
    concentration: f32,
}

/// Contiguous tonal chunks, in sample offsets.
#[derive(Debug, Clone, Copy)]
struct ToneRun {
    start: usize,
    end: usize,
    strongest: Peak,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpectralBeepDetector;

impl SpectralBeepDetector {
    pub fn detect(
        &self,
        buffer: &AudioBuffer<'_>,
        config: &DetectionConfig,
    ) -> BeepDetectionResult {
        let windower = SignalWindower::new(*buffer, config.analysis_window);
        let n = windower.chunk_len();
        if windower.full_chunk_count() == 0 || n < 2 {
            tracing::debug!(
                samples = buffer.len(),
                chunk_len = n,
                "buffer shorter than one analysis chunk, skipping beep detection"
            );
            return BeepDetectionResult::not_detected();
        }

        let window = hamming(n);
        let window_sum: f32 = window.iter().sum();
        let fft = FftPlanner::<f32>::new().plan_fft_forward(n);
        let bin_hz = buffer.sample_rate() as f32 / n as f32;
        let mut spectrum = vec![Complex::new(0.0f32, 0.0); n];

        let mut run: Option<ToneRun> = None;

        for chunk in windower.chunks() {
            // A short tail has coarser bins; treat it like the end of audio.
            let peak = if windower.is_full(&chunk) {
                let weighted = chunk.samples.iter().zip(&window);
                for (slot, (&sample, &w)) in spectrum.iter_mut().zip(weighted) {
                    *slot = Complex::new(sample * w, 0.0);
                }
                fft.process(&mut spectrum);
                Some(peak_of(&spectrum, bin_hz, window_sum))
            } else {
                None
            };

            let tonal = peak.filter(|p| {
                config.beep_freq_range.contains(p.frequency_hz)
                    && p.concentration >= config.beep_min_peak_ratio
                    && p.amplitude >= config.beep_min_amplitude
            });

            match (tonal, run.as_mut()) {
                (Some(peak), Some(current)) => {
                    current.end = chunk.end_offset();
                    if peak.amplitude > current.strongest.amplitude {
                        current.strongest = peak;
                    }
                }
                (Some(peak), None) => {
                    run = Some(ToneRun {
                        start: chunk.offset,
                        end: chunk.end_offset(),
                        strongest: peak,
                    });
                }
                (None, _) => {
                    if let Some(closed) = run.take()
                        && let Some(result) = judge(closed, buffer, config)
                    {
                        return result;
                    }
                }
            }
        }

        run.and_then(|closed| judge(closed, buffer, config))
            .unwrap_or_else(BeepDetectionResult::not_detected)
    }
}

/// Accepts `run` if its length lies within `beep_duration_range`.
fn judge(
    run: ToneRun,
    buffer: &AudioBuffer<'_>,
    config: &DetectionConfig,
) -> Option<BeepDetectionResult> {
    let duration = (run.end - run.start) as f64 / buffer.sample_rate() as f64;
    let start_time = buffer.time_at(run.start);

    if !config.beep_duration_range.contains(duration) {
        tracing::debug!(
            start = start_time,
            duration,
            frequency_hz = run.strongest.frequency_hz,
            "tone run outside beep duration range, continuing"
        );
        return None;
    }

    let result = BeepDetectionResult {
        detected: true,
        start_time,
        end_time: buffer.time_at(run.end),
        frequency_hz: run.strongest.frequency_hz,
        duration,
    };
    tracing::debug!(
        start = result.start_time,
        end = result.end_time,
        frequency_hz = result.frequency_hz,
        "beep detected"
    );
    Some(result)
}

/// Strongest non-DC bin up to Nyquist.
///
/// The amplitude is normalised by the window's coherent gain so a full-scale
/// sinusoid centred on a bin reads as 1.0. A silent chunk has zero
/// concentration.
fn peak_of(spectrum: &[Complex<f32>], bin_hz: f32, window_sum: f32) -> Peak {
    let half = spectrum.len() / 2;
    let power: Vec<f32> = spectrum[1..=half].iter().map(|c| c.norm_sqr()).collect();
    let (index, peak_power) = power
        .iter()
        .copied()
        .enumerate()
        .fold((0, 0.0f32), |best, cur| if cur.1 > best.1 { cur } else { best });

    let total: f32 = power.iter().sum();
    let lobe_start = index.saturating_sub(MAIN_LOBE_BINS);
    let lobe_end = (index + MAIN_LOBE_BINS).min(power.len() - 1);
    let lobe: f32 = power[lobe_start..=lobe_end].iter().sum();

    Peak {
        frequency_hz: (index + 1) as f32 * bin_hz,
        amplitude: 2.0 * peak_power.sqrt() / window_sum,
        concentration: if total > 0.0 { lobe / total } else { 0.0 },
    }
}

/// Hamming window coefficients of length `n` (n >= 2).
fn hamming(n: usize) -> Vec<f32> {
    let denom = (n - 1) as f32;
    (0..n)
        .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f32 / denom).cos())
        .collect()
}
