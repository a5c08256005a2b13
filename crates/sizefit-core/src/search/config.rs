//! Search constants and the quality schedule they produce.

use serde::{Deserialize, Serialize};

use crate::error::{CompressError, CompressResult};

/// What to do when the source already fits under the ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmallSourcePolicy {
    /// Encode once at [`SearchConfig::reencode_quality`] and write that.
    #[default]
    Reencode,
    /// Write the original bytes unchanged.
    Copy,
}

/// Parameters of the descending quality search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// First quality tried (1-100).
    pub start_quality: u8,
    /// Amount subtracted after each rejected candidate.
    pub step: u8,
    /// Handling of sources that are already small enough.
    pub small_source: SmallSourcePolicy,
    /// Quality used by [`SmallSourcePolicy::Reencode`].
    pub reencode_quality: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            start_quality: 95,
            step: 5,
            small_source: SmallSourcePolicy::Reencode,
            reencode_quality: 95,
        }
    }
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style override of the small-source policy.
    pub fn with_small_source(mut self, policy: SmallSourcePolicy) -> Self {
        self.small_source = policy;
        self
    }

    /// Reject configurations that cannot yield a finite, in-range schedule.
    pub fn validate(&self) -> CompressResult<()> {
        if self.step == 0 {
            return Err(CompressError::InvalidConfig("step must be non-zero".into()));
        }
        if self.start_quality == 0 || self.start_quality > 100 {
            return Err(CompressError::InvalidConfig(format!(
                "start quality must be in 1..=100, got {}",
                self.start_quality
            )));
        }
        if self.reencode_quality > 100 {
            return Err(CompressError::InvalidConfig(format!(
                "re-encode quality must be in 0..=100, got {}",
                self.reencode_quality
            )));
        }
        Ok(())
    }

    /// Qualities to try, highest first: `start, start - step, ...` while > 0.
    ///
    /// Yields nothing if `step` is zero; call [`Self::validate`] first.
    pub fn qualities(&self) -> impl Iterator<Item = u8> {
        let step = usize::from(self.step);
        (0..=self.start_quality)
            .rev()
            .step_by(step.max(1))
            .take_while(move |&q| q > 0 && step > 0)
    }
}
