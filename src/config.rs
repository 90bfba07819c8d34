//! Detection configuration.
//!
//! [`DetectionConfig`] is the immutable value every detector and the decision
//! cascade read from. It is built once per analysis and passed by reference;
//! retuning means building a new value. [`Config`] is the on-disk TOML root
//! that resolves a [`Profile`] plus per-field overrides into one.

use crate::defaults;
use crate::error::{Result, VmdropError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Inclusive frequency band in Hz.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FrequencyRange {
    pub low: f32,
    pub high: f32,
}

impl FrequencyRange {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, hz: f32) -> bool {
        hz >= self.low && hz <= self.high
    }
}

/// Inclusive duration range in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DurationRange {
    pub min: f64,
    pub max: f64,
}

impl DurationRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, seconds: f64) -> bool {
        seconds >= self.min && seconds <= self.max
    }
}

/// One evidence tier of the decision cascade.
///
/// The duration fallback is not listed here: it always closes the cascade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceRule {
    Beep,
    Silence,
    Phrase,
}

/// Named parameter sets observed in deployed greetings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// 800-1200 Hz band, 0.5s safety buffer, 300ms minimum silence.
    #[default]
    Standard,
    /// 1000 Hz +/- 50 band, 0.4s safety buffer, 1200ms minimum silence.
    NarrowBand,
}

impl FromStr for Profile {
    type Err = VmdropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Profile::Standard),
            "narrow-band" | "narrow_band" | "narrow" => Ok(Profile::NarrowBand),
            other => Err(VmdropError::invalid_config(
                "profile",
                format!("unknown profile '{other}' (expected standard or narrow-band)"),
            )),
        }
    }
}

/// Every tunable threshold used by detection and the decision cascade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionConfig {
    /// RMS amplitude below which a chunk is silent.
    pub silence_threshold: f32,
    /// Minimum silence run, in seconds.
    pub min_silence_duration: f64,
    pub beep_freq_range: FrequencyRange,
    pub beep_duration_range: DurationRange,
    /// Noise floor: minimum peak amplitude (full-scale units) for a tonal chunk.
    pub beep_min_amplitude: f32,
    /// Minimum share of spectral power in the peak's main lobe, in (0, 1].
    pub beep_min_peak_ratio: f32,
    /// Seconds added after the beep ends.
    pub safety_buffer: f64,
    /// Seconds added after silence onset.
    pub post_silence_buffer: f64,
    /// End-of-greeting phrases, matched case-insensitively in list order.
    pub end_phrases: Vec<String>,
    pub phrase_fallback_fraction: f64,
    pub duration_fallback_fraction: f64,
    /// Analysis chunk length in seconds.
    pub analysis_window: f64,
    /// Evidence tiers in priority order. Duration fallback always follows.
    pub cascade: Vec<EvidenceRule>,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self::for_profile(Profile::Standard)
    }
}

impl DetectionConfig {
    /// Builds the configuration for a named profile.
    pub fn for_profile(profile: Profile) -> Self {
        let (silence_threshold, min_silence_duration, low, high, safety_buffer) = match profile {
            Profile::Standard => (
                defaults::STANDARD_SILENCE_THRESHOLD,
                defaults::STANDARD_MIN_SILENCE,
                defaults::STANDARD_BEEP_FREQ_LOW,
                defaults::STANDARD_BEEP_FREQ_HIGH,
                defaults::STANDARD_SAFETY_BUFFER,
            ),
            Profile::NarrowBand => (
                defaults::NARROW_SILENCE_THRESHOLD,
                defaults::NARROW_MIN_SILENCE,
                defaults::NARROW_BEEP_FREQ_LOW,
                defaults::NARROW_BEEP_FREQ_HIGH,
                defaults::NARROW_SAFETY_BUFFER,
            ),
        };

        Self {
            silence_threshold,
            min_silence_duration,
            beep_freq_range: FrequencyRange::new(low, high),
            beep_duration_range: DurationRange::new(
                defaults::BEEP_MIN_DURATION,
                defaults::BEEP_MAX_DURATION,
            ),
            beep_min_amplitude: defaults::BEEP_MIN_AMPLITUDE,
            beep_min_peak_ratio: defaults::BEEP_MIN_PEAK_RATIO,
            safety_buffer,
            post_silence_buffer: defaults::POST_SILENCE_BUFFER,
            end_phrases: defaults::END_PHRASES
                .iter()
                .map(|p| p.to_string())
                .collect(),
            phrase_fallback_fraction: defaults::PHRASE_FALLBACK_FRACTION,
            duration_fallback_fraction: defaults::DURATION_FALLBACK_FRACTION,
            analysis_window: defaults::ANALYSIS_WINDOW,
            cascade: vec![
                EvidenceRule::Beep,
                EvidenceRule::Silence,
                EvidenceRule::Phrase,
            ],
        }
    }

    /// Rejects logically inconsistent thresholds.
    pub fn validate(&self) -> Result<()> {
        non_negative("silence_threshold", self.silence_threshold as f64)?;
        non_negative("min_silence_duration", self.min_silence_duration)?;
        non_negative("beep_min_amplitude", self.beep_min_amplitude as f64)?;
        non_negative("safety_buffer", self.safety_buffer)?;
        non_negative("post_silence_buffer", self.post_silence_buffer)?;

        let band = self.beep_freq_range;
        non_negative("beep_freq_range.low", band.low as f64)?;
        non_negative("beep_freq_range.high", band.high as f64)?;
        if band.low >= band.high {
            return Err(VmdropError::invalid_config(
                "beep_freq_range",
                format!("low ({} Hz) must be below high ({} Hz)", band.low, band.high),
            ));
        }

        let span = self.beep_duration_range;
        non_negative("beep_duration_range.min", span.min)?;
        non_negative("beep_duration_range.max", span.max)?;
        if span.min <= 0.0 {
            return Err(VmdropError::invalid_config(
                "beep_duration_range.min",
                "must be greater than zero",
            ));
        }
        if span.min > span.max {
            return Err(VmdropError::invalid_config(
                "beep_duration_range",
                format!("min ({}s) exceeds max ({}s)", span.min, span.max),
            ));
        }

        let ratio = self.beep_min_peak_ratio;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(VmdropError::invalid_config(
                "beep_min_peak_ratio",
                format!("must be within (0, 1] (got {ratio})"),
            ));
        }

        fraction("phrase_fallback_fraction", self.phrase_fallback_fraction)?;
        fraction("duration_fallback_fraction", self.duration_fallback_fraction)?;

        if !(self.analysis_window.is_finite() && self.analysis_window > 0.0) {
            return Err(VmdropError::invalid_config(
                "analysis_window",
                "must be a positive number of seconds",
            ));
        }

        if self.end_phrases.iter().any(|p| p.trim().is_empty()) {
            return Err(VmdropError::invalid_config(
                "end_phrases",
                "phrases must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.cascade {
            if !seen.insert(rule) {
                return Err(VmdropError::invalid_config(
                    "cascade",
                    format!("rule {rule:?} listed more than once"),
                ));
            }
        }

        Ok(())
    }

    /// Checks the settings that depend on the audio being analysed.
    pub fn validate_for_sample_rate(&self, sample_rate: u32) -> Result<()> {
        let nyquist = sample_rate as f32 / 2.0;
        if self.beep_freq_range.high > nyquist {
            return Err(VmdropError::invalid_config(
                "beep_freq_range.high",
                format!(
                    "{} Hz is above the Nyquist frequency ({} Hz) of {} Hz audio",
                    self.beep_freq_range.high, nyquist, sample_rate
                ),
            ));
        }
        Ok(())
    }
}

fn non_negative(key: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VmdropError::invalid_config(
            key,
            format!("must be a finite, non-negative number (got {value})"),
        ))
    }
}

fn fraction(key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(VmdropError::invalid_config(
            key,
            format!("must be within [0, 1] (got {value})"),
        ))
    }
}

/// Live-call emulation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Seconds of audio delivered per simulated chunk.
    pub chunk_duration: f64,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_duration: defaults::STREAM_CHUNK_DURATION,
        }
    }
}

/// Root configuration, as stored in a TOML file.
///
/// ```toml
/// profile = "narrow-band"
///
/// [detection]
/// safety_buffer = 0.6
///
/// [stream]
/// chunk_duration = 0.25
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub profile: Profile,
    pub detection: DetectionConfig,
    pub stream: StreamConfig,
}

/// File shape before the profile is resolved. `detection` stays a raw table
/// so its keys can be laid over the profile rather than over the default.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    profile: Profile,
    #[serde(default)]
    detection: toml::Table,
    #[serde(default)]
    stream: StreamConfig,
}

impl Config {
    /// Parses and validates configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(contents)?;

        let base = DetectionConfig::for_profile(raw.profile);
        let mut merged = toml::Table::try_from(&base).map_err(|e| VmdropError::ConfigParse {
            message: e.to_string(),
        })?;
        merge_tables(&mut merged, raw.detection);
        let detection: DetectionConfig = merged.try_into()?;

        let config = Self {
            profile: raw.profile,
            detection,
            stream: raw.stream,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// Missing fields fall back to the selected profile's values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VmdropError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VmdropError::Io(e)
            }
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration, or return defaults if the file doesn't exist.
    ///
    /// Invalid TOML and invalid values are still errors.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(VmdropError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - VMDROP_SILENCE_THRESHOLD → detection.silence_threshold
    /// - VMDROP_MIN_SILENCE → detection.min_silence_duration
    /// - VMDROP_SAFETY_BUFFER → detection.safety_buffer
    /// - VMDROP_STREAM_CHUNK → stream.chunk_duration
    ///
    /// Empty values are ignored; unparsable values are an error.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(value) = env_number::<f32>("VMDROP_SILENCE_THRESHOLD")? {
            self.detection.silence_threshold = value;
        }
        if let Some(value) = env_number::<f64>("VMDROP_MIN_SILENCE")? {
            self.detection.min_silence_duration = value;
        }
        if let Some(value) = env_number::<f64>("VMDROP_SAFETY_BUFFER")? {
            self.detection.safety_buffer = value;
        }
        if let Some(value) = env_number::<f64>("VMDROP_STREAM_CHUNK")? {
            self.stream.chunk_duration = value;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        if !(self.stream.chunk_duration.is_finite() && self.stream.chunk_duration > 0.0) {
            return Err(VmdropError::invalid_config(
                "stream.chunk_duration",
                "must be a positive number of seconds",
            ));
        }
        Ok(())
    }
}

/// Lays `overrides` over `base`, descending into nested tables.
fn merge_tables(base: &mut toml::Table, overrides: toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn env_number<T: FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| VmdropError::invalid_config(key, format!("cannot parse '{value}'"))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Mutex to serialize tests that modify environment variables
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    // SAFETY: These helpers are only used in tests with ENV_LOCK held,
    // ensuring no concurrent access to environment variables.
    fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) }
    }

    fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) }
    }

    fn clear_vmdrop_env() {
        remove_env("VMDROP_SILENCE_THRESHOLD");
        remove_env("VMDROP_MIN_SILENCE");
        remove_env("VMDROP_SAFETY_BUFFER");
        remove_env("VMDROP_STREAM_CHUNK");
    }

    #[test]
    fn test_default_config_is_standard_profile() {
        let config = DetectionConfig::default();

        assert_eq!(config, DetectionConfig::for_profile(Profile::Standard));
        assert_eq!(config.silence_threshold, 0.02);
        assert_eq!(config.min_silence_duration, 0.3);
        assert_eq!(config.beep_freq_range, FrequencyRange::new(800.0, 1200.0));
        assert_eq!(config.beep_duration_range, DurationRange::new(0.3, 2.0));
        assert_eq!(config.safety_buffer, 0.5);
        assert_eq!(config.beep_min_peak_ratio, 0.5);
        assert_eq!(config.phrase_fallback_fraction, 0.85);
        assert_eq!(config.duration_fallback_fraction, 0.80);
        assert_eq!(
            config.cascade,
            vec![EvidenceRule::Beep, EvidenceRule::Silence, EvidenceRule::Phrase]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_narrow_band_profile_values() {
        let config = DetectionConfig::for_profile(Profile::NarrowBand);

        assert_eq!(config.beep_freq_range, FrequencyRange::new(950.0, 1050.0));
        assert_eq!(config.safety_buffer, 0.4);
        assert_eq!(config.min_silence_duration, 1.2);
        assert_eq!(config.silence_threshold, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("standard".parse::<Profile>().unwrap(), Profile::Standard);
        assert_eq!("Narrow-Band".parse::<Profile>().unwrap(), Profile::NarrowBand);
        assert!("loud".parse::<Profile>().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_frequency_band() {
        let config = DetectionConfig {
            beep_freq_range: FrequencyRange::new(1200.0, 800.0),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            VmdropError::InvalidConfiguration { ref key, .. } if key == "beep_freq_range"
        ));
    }

    #[test]
    fn test_validate_rejects_equal_frequency_bounds() {
        let config = DetectionConfig {
            beep_freq_range: FrequencyRange::new(1000.0, 1000.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_duration_range() {
        let config = DetectionConfig {
            beep_duration_range: DurationRange::new(2.0, 0.3),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("beep_duration_range"));
    }

    #[test]
    fn test_validate_rejects_negative_thresholds() {
        let config = DetectionConfig {
            silence_threshold: -0.01,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DetectionConfig {
            safety_buffer: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_fraction_out_of_range() {
        let config = DetectionConfig {
            duration_fallback_fraction: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_peak_ratio_outside_unit_interval() {
        for ratio in [0.0, -0.2, 1.5, f32::NAN] {
            let config = DetectionConfig {
                beep_min_peak_ratio: ratio,
                ..Default::default()
            };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("beep_min_peak_ratio"));
        }

        let config = DetectionConfig {
            beep_min_peak_ratio: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicate_cascade_rules() {
        let config = DetectionConfig {
            cascade: vec![EvidenceRule::Beep, EvidenceRule::Beep],
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cascade"));
    }

    #[test]
    fn test_validate_rejects_blank_phrase() {
        let config = DetectionConfig {
            end_phrases: vec!["after the beep".to_string(), "  ".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_for_sample_rate_checks_nyquist() {
        let config = DetectionConfig::default();
        assert!(config.validate_for_sample_rate(8000).is_ok());
        assert!(config.validate_for_sample_rate(2000).is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let toml_content = r#"
            profile = "narrow-band"

            [detection]
            safety_buffer = 0.6
            end_phrases = ["after the tone"]
            cascade = ["silence", "beep"]

            [detection.beep_duration_range]
            min = 0.2
            max = 1.5

            [stream]
            chunk_duration = 0.25
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(temp_file.path()).unwrap();

        assert_eq!(config.profile, Profile::NarrowBand);
        assert_eq!(config.detection.safety_buffer, 0.6);
        assert_eq!(config.detection.end_phrases, vec!["after the tone"]);
        assert_eq!(
            config.detection.cascade,
            vec![EvidenceRule::Silence, EvidenceRule::Beep]
        );
        assert_eq!(
            config.detection.beep_duration_range,
            DurationRange::new(0.2, 1.5)
        );
        assert_eq!(config.stream.chunk_duration, 0.25);

        // Untouched fields come from the narrow-band profile, not the default
        assert_eq!(
            config.detection.beep_freq_range,
            FrequencyRange::new(950.0, 1050.0)
        );
        assert_eq!(config.detection.min_silence_duration, 1.2);
    }

    #[test]
    fn test_partial_nested_override_keeps_profile_bound() {
        let toml_content = r#"
            [detection.beep_freq_range]
            high = 1100.0
        "#;
        let config = Config::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.detection.beep_freq_range,
            FrequencyRange::new(800.0, 1100.0)
        );
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_values_in_file_fail_fast() {
        let toml_content = r#"
            [detection.beep_freq_range]
            low = 1500.0
            high = 900.0
        "#;
        let err = Config::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, VmdropError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let invalid_toml = r#"
            [detection
            safety_buffer = "broken
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(invalid_toml.as_bytes()).unwrap();

        let result = Config::load(temp_file.path());
        assert!(matches!(result, Err(VmdropError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let missing = Path::new("/tmp/nonexistent_vmdrop_config_12345.toml");
        let err = Config::load(missing).unwrap_err();
        assert!(matches!(err, VmdropError::ConfigFileNotFound { .. }));
        assert!(err.to_string().contains("nonexistent_vmdrop_config_12345"));
    }

    #[test]
    fn test_load_or_default_returns_default_for_missing_file() {
        let missing = Path::new("/tmp/nonexistent_vmdrop_config_12345.toml");
        let config = Config::load_or_default(missing).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_or_default_propagates_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"profile = ").unwrap();

        assert!(Config::load_or_default(temp_file.path()).is_err());
    }

    #[test]
    fn test_env_override_safety_buffer() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vmdrop_env();

        set_env("VMDROP_SAFETY_BUFFER", "0.45");
        let config = Config::default().with_env_overrides().unwrap();

        assert_eq!(config.detection.safety_buffer, 0.45);
        assert_eq!(config.detection.silence_threshold, 0.02); // Not overridden

        clear_vmdrop_env();
    }

    #[test]
    fn test_env_override_all() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vmdrop_env();

        set_env("VMDROP_SILENCE_THRESHOLD", "0.015");
        set_env("VMDROP_MIN_SILENCE", "1.2");
        set_env("VMDROP_SAFETY_BUFFER", "0.4");
        set_env("VMDROP_STREAM_CHUNK", "0.2");

        let config = Config::default().with_env_overrides().unwrap();

        assert_eq!(config.detection.silence_threshold, 0.015);
        assert_eq!(config.detection.min_silence_duration, 1.2);
        assert_eq!(config.detection.safety_buffer, 0.4);
        assert_eq!(config.stream.chunk_duration, 0.2);

        clear_vmdrop_env();
    }

    #[test]
    fn test_env_override_empty_string_ignored() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vmdrop_env();

        set_env("VMDROP_SAFETY_BUFFER", "");
        let config = Config::default().with_env_overrides().unwrap();
        assert_eq!(config.detection.safety_buffer, 0.5);

        clear_vmdrop_env();
    }

    #[test]
    fn test_env_override_garbage_is_error() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_vmdrop_env();

        set_env("VMDROP_MIN_SILENCE", "half a second");
        let err = Config::default().with_env_overrides().unwrap_err();
        assert!(err.to_string().contains("VMDROP_MIN_SILENCE"));

        clear_vmdrop_env();
    }
}
