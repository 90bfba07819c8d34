//! Pipeline entry points.
//!
//! Validation happens here, once, before any detector runs. After that the
//! pipeline cannot fail: detectors report what they found and the cascade
//! always produces a decision.

use crate::audio::AudioBuffer;
use crate::config::DetectionConfig;
use crate::decision::{DecisionEngine, DropDecision, Evidence};
use crate::detect::{PhrasePatternMatcher, SilenceDetector, SpectralBeepDetector};
use crate::error::Result;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// Decides the drop timestamp for one greeting.
///
/// `transcript` is optional; without it phrase matching is skipped.
pub fn analyze(
    buffer: &AudioBuffer<'_>,
    transcript: Option<&str>,
    config: &DetectionConfig,
) -> Result<DropDecision> {
    config.validate()?;
    config.validate_for_sample_rate(buffer.sample_rate())?;
    Ok(evaluate(buffer, transcript, config))
}

/// Like [`analyze`], but builds and validates the buffer from raw samples.
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    transcript: Option<&str>,
    config: &DetectionConfig,
) -> Result<DropDecision> {
    let buffer = AudioBuffer::new(samples, sample_rate)?;
    analyze(&buffer, transcript, config)
}

/// Runs every detector over `buffer`.
pub fn collect_evidence(
    buffer: &AudioBuffer<'_>,
    transcript: Option<&str>,
    config: &DetectionConfig,
) -> Evidence {
    let beep = SpectralBeepDetector.detect(buffer, config);
    let silence = SilenceDetector.detect(buffer, config);
    let phrase = transcript.map(|text| PhrasePatternMatcher.find(text, &config.end_phrases));

    Evidence {
        beep,
        silence,
        phrase,
    }
}

/// Detection plus decision, for input that has already been validated.
pub(crate) fn evaluate(
    buffer: &AudioBuffer<'_>,
    transcript: Option<&str>,
    config: &DetectionConfig,
) -> DropDecision {
    let evidence = collect_evidence(buffer, transcript, config);
    DecisionEngine::new(config).decide(evidence, buffer.duration(), config)
}

/// One greeting in a batch.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisJob<'a> {
    pub samples: &'a [f32],
    pub sample_rate: u32,
    pub transcript: Option<&'a str>,
}

/// Analyses independent greetings in parallel.
///
/// Uses one worker per available core, never more than there are jobs.
/// Results come back in job order; a bad job only fails its own slot.
pub fn analyze_batch(
    jobs: &[AnalysisJob<'_>],
    config: &DetectionConfig,
) -> Vec<Result<DropDecision>> {
    let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    analyze_batch_with_workers(jobs, config, workers)
}

/// Like [`analyze_batch`] with an explicit worker count, clamped to
/// `1..=jobs.len()`.
///
/// Workers pull the next job index from a shared counter, so a slow greeting
/// only holds up its own worker.
pub fn analyze_batch_with_workers(
    jobs: &[AnalysisJob<'_>],
    config: &DetectionConfig,
    workers: usize,
) -> Vec<Result<DropDecision>> {
    let workers = workers.clamp(1, jobs.len().max(1));
    tracing::debug!(jobs = jobs.len(), workers, "starting batch analysis");

    let next = AtomicUsize::new(0);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut finished = Vec::new();
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        let Some(job) = jobs.get(index) else {
                            break;
                        };
                        let result =
                            analyze_samples(job.samples, job.sample_rate, job.transcript, config);
                        finished.push((index, result));
                    }
                    finished
                })
            })
            .collect();

        let mut slots: Vec<Option<Result<DropDecision>>> = jobs.iter().map(|_| None).collect();
        for handle in handles {
            match handle.join() {
                Ok(finished) => {
                    for (index, result) in finished {
                        slots[index] = Some(result);
                    }
                }
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        // Every index below jobs.len() was claimed by exactly one worker.
        slots.into_iter().flatten().collect()
    })
}
