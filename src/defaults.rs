//! Default configuration constants for vmdrop.
//!
//! Two parameter sets are in use in the field. The `STANDARD_*` set is the
//! wide-band profile and the default; the `NARROW_*` set targets greetings
//! that end in a clean 1 kHz beep. Neither is referenced by detector logic:
//! both only seed [`crate::config::DetectionConfig`].

/// RMS amplitude below which an analysis chunk counts as silent.
pub const STANDARD_SILENCE_THRESHOLD: f32 = 0.02;

/// Minimum contiguous silence, in seconds.
pub const STANDARD_MIN_SILENCE: f64 = 0.3;

/// Beep frequency band in Hz (inclusive).
pub const STANDARD_BEEP_FREQ_LOW: f32 = 800.0;
pub const STANDARD_BEEP_FREQ_HIGH: f32 = 1200.0;

/// Delay after the beep ends before the message starts, in seconds.
pub const STANDARD_SAFETY_BUFFER: f64 = 0.5;

pub const NARROW_SILENCE_THRESHOLD: f32 = 0.01;
pub const NARROW_MIN_SILENCE: f64 = 1.2;
pub const NARROW_BEEP_FREQ_LOW: f32 = 950.0;
pub const NARROW_BEEP_FREQ_HIGH: f32 = 1050.0;
pub const NARROW_SAFETY_BUFFER: f64 = 0.4;

/// Accepted beep duration in seconds. Shorter runs are clicks or noise,
/// longer runs are ringback or a sustained tone.
pub const BEEP_MIN_DURATION: f64 = 0.3;
pub const BEEP_MAX_DURATION: f64 = 2.0;

/// Noise floor: minimum peak amplitude (full-scale units) for a tonal chunk.
pub const BEEP_MIN_AMPLITUDE: f32 = 0.05;

/// Minimum share of a chunk's spectral power that the peak's main lobe must
/// hold. A clean tone holds nearly all of it; a vowel spreads it over its
/// harmonics.
pub const BEEP_MIN_PEAK_RATIO: f32 = 0.5;

/// Delay after silence onset before the message starts, in seconds.
pub const POST_SILENCE_BUFFER: f64 = 0.2;

/// Fraction of the greeting duration used when only an end phrase matched.
pub const PHRASE_FALLBACK_FRACTION: f64 = 0.85;

/// Fraction of the greeting duration used when nothing fired at all.
pub const DURATION_FALLBACK_FRACTION: f64 = 0.80;

/// Length of one analysis chunk in seconds.
///
/// 100ms gives 10 Hz bins at any sample rate, fine enough to separate a
/// 1 kHz beep from neighbouring speech formants.
pub const ANALYSIS_WINDOW: f64 = 0.1;

/// Length of one simulated live-call delivery, in seconds.
pub const STREAM_CHUNK_DURATION: f64 = 0.5;

/// Phrases that typically close a voicemail greeting.
pub const END_PHRASES: &[&str] = &[
    "leave a message",
    "after the beep",
    "after the tone",
    "at the tone",
    "leave your message",
    "record your message",
    "not available",
    "can't take your call",
    "cannot take your call",
    "get back to you",
];
