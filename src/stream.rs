//! Live-call emulation.
//!
//! [`StreamChunkFeeder`] hands out a buffer in fixed-duration deliveries, the
//! way audio would arrive on a live call. [`StreamingAnalyzer`] re-runs the
//! detectors and the cascade over everything received so far after each
//! delivery and stops pulling once the caller's stop condition holds. The
//! default condition is a settled BEEP or SILENCE decision, so a long
//! greeting is not scanned past the point a clear signal fired.
//!
//! ```text
//! buffer ──▶ feeder ──chunk──▶ received prefix ──▶ detectors ──▶ cascade ──▶ stop?
//!              ▲                                                              │
//!              └────────────────────────── no ────────────────────────────────┘
//! ```
//!
//! A decision reached at some delivery equals the batch decision for the
//! buffer truncated at that point.

use crate::analysis;
use crate::audio::{AudioBuffer, Chunks, SignalWindower};
use crate::config::{DetectionConfig, StreamConfig};
use crate::decision::{DropDecision, TriggerMethod};
use crate::error::{Result, VmdropError};

/// One simulated delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamChunk<'a> {
    pub samples: &'a [f32],
    /// Offset of the first sample from stream start, in seconds.
    pub start_time: f64,
    /// Zero-based delivery number.
    pub index: usize,
}

/// Cursor handing out a buffer in fixed-size deliveries.
///
/// Deliveries are cut by the same [`SignalWindower`] the detectors use.
/// Single consumer: the cursor only moves forward until [`rewind`](Self::rewind).
#[derive(Debug, Clone)]
pub struct StreamChunkFeeder<'a> {
    buffer: AudioBuffer<'a>,
    windower: SignalWindower<'a>,
    chunks: Chunks<'a>,
    position: usize,
    delivered: usize,
}

impl<'a> StreamChunkFeeder<'a> {
    /// `chunk_duration` is rounded to whole samples, never below one.
    pub fn new(buffer: AudioBuffer<'a>, chunk_duration: f64) -> Self {
        let windower = SignalWindower::new(buffer, chunk_duration);
        Self {
            buffer,
            windower,
            chunks: windower.chunks(),
            position: 0,
            delivered: 0,
        }
    }

    /// Advances the cursor, or returns `None` once the buffer is exhausted.
    pub fn next_chunk(&mut self) -> Option<StreamChunk<'a>> {
        let chunk = self.chunks.next()?;
        let delivery = StreamChunk {
            samples: chunk.samples,
            start_time: chunk.start_time,
            index: self.delivered,
        };
        self.position = chunk.end_offset();
        self.delivered += 1;
        Some(delivery)
    }

    /// Samples delivered so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn chunks_delivered(&self) -> usize {
        self.delivered
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Everything delivered so far, or `None` before the first delivery.
    pub fn received(&self) -> Option<AudioBuffer<'a>> {
        (self.position > 0).then(|| self.buffer.prefix(self.position))
    }

    /// Restarts delivery from the beginning of the buffer.
    pub fn rewind(&mut self) {
        self.chunks = self.windower.chunks();
        self.position = 0;
        self.delivered = 0;
    }
}

impl<'a> Iterator for StreamChunkFeeder<'a> {
    type Item = StreamChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk()
    }
}

/// How much audio a streaming run has consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamProgress {
    pub chunks_consumed: usize,
    pub samples_received: usize,
    /// Seconds of audio received.
    pub received_duration: f64,
    /// Samples per analysis window.
    pub analysis_window_len: usize,
}

/// Result of a streaming run.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamOutcome {
    pub decision: DropDecision,
    pub progress: StreamProgress,
    /// The stop condition held; otherwise the buffer ran out first.
    pub finalized: bool,
}

/// Default stop condition.
///
/// SILENCE is settled as soon as it is reported. BEEP is settled only once at
/// least one full analysis window after the tone has been received, so a tone
/// still sounding at the stream edge cannot be mistaken for a finished beep.
pub fn is_settled(decision: &DropDecision, progress: &StreamProgress, sample_rate: u32) -> bool {
    match decision.method {
        TriggerMethod::Silence => true,
        TriggerMethod::Beep => {
            let end = (decision.evidence.beep.end_time * sample_rate as f64).round() as usize;
            end + progress.analysis_window_len <= progress.samples_received
        }
        TriggerMethod::PhraseFallback | TriggerMethod::DurationFallback => false,
    }
}

/// Incremental analysis over a [`StreamChunkFeeder`].
#[derive(Debug, Clone, Copy)]
pub struct StreamingAnalyzer<'c> {
    config: &'c DetectionConfig,
    chunk_duration: f64,
}

impl<'c> StreamingAnalyzer<'c> {
    /// Validates both configurations up front.
    pub fn new(config: &'c DetectionConfig, stream: &StreamConfig) -> Result<Self> {
        config.validate()?;
        if !(stream.chunk_duration.is_finite() && stream.chunk_duration > 0.0) {
            return Err(VmdropError::invalid_config(
                "stream.chunk_duration",
                "must be a positive number of seconds",
            ));
        }
        Ok(Self {
            config,
            chunk_duration: stream.chunk_duration,
        })
    }

    /// Streams `buffer` until a settled BEEP or SILENCE decision.
    pub fn run(&self, buffer: &AudioBuffer<'_>, transcript: Option<&str>) -> Result<StreamOutcome> {
        let sample_rate = buffer.sample_rate();
        self.run_until(buffer, transcript, |decision, progress| {
            is_settled(decision, progress, sample_rate)
        })
    }

    /// Streams `buffer`, evaluating after every delivery, until `stop` returns
    /// true. A caller that never stops exhausts the buffer and gets the
    /// whole-buffer decision.
    pub fn run_until<F>(
        &self,
        buffer: &AudioBuffer<'_>,
        transcript: Option<&str>,
        mut stop: F,
    ) -> Result<StreamOutcome>
    where
        F: FnMut(&DropDecision, &StreamProgress) -> bool,
    {
        self.config.validate_for_sample_rate(buffer.sample_rate())?;

        let analysis_window_len = buffer.samples_for(self.config.analysis_window).max(1);
        let mut feeder = StreamChunkFeeder::new(*buffer, self.chunk_duration);
        let mut last: Option<(DropDecision, StreamProgress)> = None;

        while feeder.next_chunk().is_some() {
            // Nothing can fire before one analysis window has arrived.
            if feeder.position() < analysis_window_len && !feeder.is_exhausted() {
                continue;
            }
            let Some(received) = feeder.received() else {
                continue;
            };

            let progress = StreamProgress {
                chunks_consumed: feeder.chunks_delivered(),
                samples_received: received.len(),
                received_duration: received.duration(),
                analysis_window_len,
            };
            let decision = analysis::evaluate(&received, transcript, self.config);
            tracing::trace!(
                chunks = progress.chunks_consumed,
                received = progress.received_duration,
                method = %decision.method,
                "streaming evaluation"
            );

            if stop(&decision, &progress) {
                tracing::debug!(
                    chunks = progress.chunks_consumed,
                    received = progress.received_duration,
                    "stream finalized"
                );
                return Ok(StreamOutcome {
                    decision,
                    progress,
                    finalized: true,
                });
            }
            last = Some((decision, progress));
        }

        let (decision, progress) = match last {
            Some(last) => last,
            None => {
                let progress = StreamProgress {
                    chunks_consumed: feeder.chunks_delivered(),
                    samples_received: buffer.len(),
                    received_duration: buffer.duration(),
                    analysis_window_len,
                };
                (analysis::evaluate(buffer, transcript, self.config), progress)
            }
        };

        Ok(StreamOutcome {
            decision,
            progress,
            finalized: false,
        })
    }
}
