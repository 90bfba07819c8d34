//! vmdrop - Voicemail drop timing
//!
//! Decides when to start playing a prerecorded message into a voicemail
//! greeting: after the beep, after the greeting falls silent, or at a
//! fallback point derived from the greeting length.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod analysis;
pub mod audio;
pub mod config;
pub mod decision;
pub mod defaults;
pub mod detect;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod stream;

// Entry points
pub use analysis::{
    AnalysisJob, analyze, analyze_batch, analyze_batch_with_workers, analyze_samples,
    collect_evidence,
};
pub use stream::{StreamChunkFeeder, StreamOutcome, StreamingAnalyzer};

// Audio
pub use audio::{AudioBuffer, pcm16_to_f32};

// Decision
pub use decision::{Confidence, DecisionEngine, DropDecision, Evidence, TriggerMethod};

// Error handling
pub use error::{Result, VmdropError};

// Config
pub use config::{Config, DetectionConfig, EvidenceRule, Profile, StreamConfig};
