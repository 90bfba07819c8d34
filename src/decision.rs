//! Drop-timing decision cascade.
//!
//! The cascade is an ordered list of rules. Each rule looks at one kind of
//! evidence and either proposes a timestamp or passes. The first proposal
//! wins; the duration fallback closes every cascade, so a decision always
//! exists. Default priority is beep, then silence, then end phrase; any
//! other order must be configured explicitly through
//! [`DetectionConfig::cascade`].

use crate::config::{DetectionConfig, EvidenceRule};
use crate::detect::{BeepDetectionResult, PhraseMatchResult, SilenceDetectionResult};
use crate::error::Result;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Which cascade branch produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerMethod {
    Beep,
    Silence,
    PhraseFallback,
    DurationFallback,
}

impl TriggerMethod {
    pub fn label(&self) -> &'static str {
        match self {
            TriggerMethod::Beep => "BEEP",
            TriggerMethod::Silence => "SILENCE",
            TriggerMethod::PhraseFallback => "PHRASE_FALLBACK",
            TriggerMethod::DurationFallback => "DURATION_FALLBACK",
        }
    }

    /// True for methods backed by an audio signal rather than a heuristic.
    pub fn is_signal(&self) -> bool {
        matches!(self, TriggerMethod::Beep | TriggerMethod::Silence)
    }
}

impl fmt::Display for TriggerMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw detector output a decision was made from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evidence {
    pub beep: BeepDetectionResult,
    pub silence: SilenceDetectionResult,
    /// `None` when no transcript was supplied and phrase matching was skipped.
    pub phrase: Option<PhraseMatchResult>,
}

impl Evidence {
    pub fn matched_phrase(&self) -> Option<&str> {
        self.phrase
            .as_ref()
            .filter(|p| p.matched)
            .and_then(|p| p.phrase.as_deref())
    }
}

/// The moment the compliance message should start, with its justification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropDecision {
    /// Seconds from greeting start, always within `[0, duration]`.
    pub timestamp: f64,
    pub confidence: Confidence,
    pub method: TriggerMethod,
    pub reasoning: String,
    /// Set when the proposed timestamp fell outside the audio and was clamped.
    pub clamped: bool,
    pub evidence: Evidence,
}

impl DropDecision {
    /// Serializes the decision and its evidence for downstream reporting.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A rule's unclamped proposal.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub timestamp: f64,
    pub confidence: Confidence,
    pub method: TriggerMethod,
    pub reasoning: String,
}

type Resolver = fn(&Evidence, f64, &DetectionConfig) -> Option<Proposal>;

/// One cascade tier: the evidence it reads and how it resolves it.
#[derive(Clone, Copy)]
pub struct Rule {
    pub evidence: EvidenceRule,
    resolve: Resolver,
}

impl Rule {
    pub fn for_evidence(evidence: EvidenceRule) -> Self {
        let resolve: Resolver = match evidence {
            EvidenceRule::Beep => resolve_beep,
            EvidenceRule::Silence => resolve_silence,
            EvidenceRule::Phrase => resolve_phrase,
        };
        Self { evidence, resolve }
    }

    pub fn resolve(
        &self,
        evidence: &Evidence,
        duration: f64,
        config: &DetectionConfig,
    ) -> Option<Proposal> {
        (self.resolve)(evidence, duration, config)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("evidence", &self.evidence)
            .finish()
    }
}

fn resolve_beep(
    evidence: &Evidence,
    _duration: f64,
    config: &DetectionConfig,
) -> Option<Proposal> {
    let beep = &evidence.beep;
    if !beep.detected {
        return None;
    }
    let timestamp = beep.end_time + config.safety_buffer;
    Some(Proposal {
        timestamp,
        confidence: Confidence::High,
        method: TriggerMethod::Beep,
        reasoning: format!(
            "BEEP: {:.0} Hz tone from {:.2}s to {:.2}s; drop at beep end + {:.2}s safety buffer = {:.2}s",
            beep.frequency_hz, beep.start_time, beep.end_time, config.safety_buffer, timestamp
        ),
    })
}

fn resolve_silence(
    evidence: &Evidence,
    _duration: f64,
    config: &DetectionConfig,
) -> Option<Proposal> {
    let silence = &evidence.silence;
    if !silence.detected {
        return None;
    }
    let timestamp = silence.start_time + config.post_silence_buffer;
    Some(Proposal {
        timestamp,
        confidence: Confidence::Medium,
        method: TriggerMethod::Silence,
        reasoning: format!(
            "SILENCE: {:.2}s of silence starting at {:.2}s; drop at silence start + {:.2}s buffer = {:.2}s",
            silence.duration, silence.start_time, config.post_silence_buffer, timestamp
        ),
    })
}

fn resolve_phrase(
    evidence: &Evidence,
    duration: f64,
    config: &DetectionConfig,
) -> Option<Proposal> {
    let phrase = evidence.matched_phrase()?;
    let timestamp = duration * config.phrase_fallback_fraction;
    Some(Proposal {
        timestamp,
        confidence: Confidence::Medium,
        method: TriggerMethod::PhraseFallback,
        reasoning: format!(
            "PHRASE_FALLBACK: transcript contains end phrase \"{}\"; drop at {:.0}% of {:.2}s = {:.2}s",
            phrase,
            config.phrase_fallback_fraction * 100.0,
            duration,
            timestamp
        ),
    })
}

/// Terminal rule. Never passes.
pub fn duration_fallback(
    evidence: &Evidence,
    duration: f64,
    config: &DetectionConfig,
) -> Proposal {
    let transcript_note = if evidence.phrase.is_some() {
        "no end phrase in transcript"
    } else {
        "no transcript"
    };
    let timestamp = duration * config.duration_fallback_fraction;
    Proposal {
        timestamp,
        confidence: Confidence::Low,
        method: TriggerMethod::DurationFallback,
        reasoning: format!(
            "DURATION_FALLBACK: no qualifying beep or silence, {}; drop at {:.0}% of {:.2}s = {:.2}s",
            transcript_note,
            config.duration_fallback_fraction * 100.0,
            duration,
            timestamp
        ),
    }
}

/// Turns detector evidence into exactly one [`DropDecision`].
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    rules: Vec<Rule>,
}

impl DecisionEngine {
    /// Builds the cascade in the order given by `config.cascade`.
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            rules: config
                .cascade
                .iter()
                .map(|&evidence| Rule::for_evidence(evidence))
                .collect(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Runs the cascade. Total: the duration fallback answers when no rule does.
    pub fn decide(
        &self,
        evidence: Evidence,
        duration: f64,
        config: &DetectionConfig,
    ) -> DropDecision {
        let proposal = self
            .rules
            .iter()
            .find_map(|rule| rule.resolve(&evidence, duration, config))
            .unwrap_or_else(|| duration_fallback(&evidence, duration, config));

        let duration = duration.max(0.0);
        let timestamp = proposal.timestamp.clamp(0.0, duration);
        let clamped = timestamp != proposal.timestamp;

        let mut reasoning = proposal.reasoning;
        if clamped {
            reasoning.push_str(&format!(
                "; clamped from {:.2}s to fit {:.2}s of audio",
                proposal.timestamp, duration
            ));
        }

        tracing::info!(
            method = %proposal.method,
            timestamp,
            confidence = ?proposal.confidence,
            clamped,
            "drop decision"
        );

        DropDecision {
            timestamp,
            confidence: proposal.confidence,
            method: proposal.method,
            reasoning,
            clamped,
            evidence,
        }
    }
}
