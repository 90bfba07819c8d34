//! Audio input views and analysis windowing.

pub mod buffer;
pub mod window;

pub use buffer::{AudioBuffer, pcm16_to_f32};
pub use window::{AnalysisChunk, Chunks, SignalWindower};
