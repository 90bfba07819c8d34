//! End-of-greeting phrase matching over a plain transcript.
//!
//! Transcripts carry no word timing, so a match never yields a timestamp. It
//! only lets the decision cascade pick the phrase-informed fallback.

use serde::Serialize;

/// Outcome of [`PhrasePatternMatcher::find`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhraseMatchResult {
    pub matched: bool,
    /// The configured phrase that matched, as configured.
    pub phrase: Option<String>,
}

impl PhraseMatchResult {
    pub fn no_match() -> Self {
        Self {
            matched: false,
            phrase: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PhrasePatternMatcher;

impl PhrasePatternMatcher {
    /// Returns the first phrase, in list order, contained in `transcript`
    /// ignoring case.
    pub fn find(&self, transcript: &str, phrases: &[String]) -> PhraseMatchResult {
        let haystack = transcript.to_lowercase();

        match phrases
            .iter()
            .find(|phrase| haystack.contains(&phrase.to_lowercase()))
        {
            Some(phrase) => {
                tracing::debug!(phrase = %phrase, "end phrase matched");
                PhraseMatchResult {
                    matched: true,
                    phrase: Some(phrase.clone()),
                }
            }
            None => PhraseMatchResult::no_match(),
        }
    }
}
