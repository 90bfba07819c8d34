//! Signal detectors feeding the decision cascade.
//!
//! ```text
//!                 ┌──────────────────┐
//!            ┌───▶│ SpectralBeep     │──┐
//! ┌────────┐ │    └──────────────────┘  │    ┌────────────────┐
//! │Windower│─┤                          ├───▶│ DecisionEngine │───▶ DropDecision
//! └────────┘ │    ┌──────────────────┐  │    └────────────────┘
//!            └───▶│ Silence          │──┤
//!                 └──────────────────┘  │
//! transcript ───▶ PhrasePatternMatcher ─┘
//! ```
//!
//! Detectors hold no state between calls. Each reads the buffer and the
//! configuration it is handed and returns a fresh result; finding nothing is
//! a normal `detected = false` outcome, never an error.

pub mod beep;
pub mod phrase;
pub mod silence;

pub use beep::{BeepDetectionResult, SpectralBeepDetector};
pub use phrase::{PhraseMatchResult, PhrasePatternMatcher};
pub use silence::{SilenceDetectionResult, SilenceDetector, calculate_rms};
