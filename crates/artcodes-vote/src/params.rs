use serde::{Deserialize, Serialize};

/// Default number of consecutive votes needed before a code is trusted.
pub const DEFAULT_REQUIRED: u32 = 20;

/// Default cap on a single code's vote count (`4 * DEFAULT_REQUIRED`).
pub const DEFAULT_MAX: u32 = DEFAULT_REQUIRED * 4;

/// Invalid threshold combinations.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteParamsError {
    #[error("required vote count must be at least 1")]
    RequiredIsZero,
    #[error("vote cap {max} is below the required vote count {required}")]
    MaxBelowRequired { required: u32, max: u32 },
}

/// When the selected code is forwarded to the sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionPolicy {
    /// Emit whenever a code is selected, or the best count reaches
    /// `required`. Since any tracked code is selectable, this fires on every
    /// frame that tracks at least one code; `required` does not gate it.
    #[default]
    AnyTracked,
    /// Emit only when a code is selected *and* its count reaches `required`.
    RequireThreshold,
    /// Like `RequireThreshold`, but each code is emitted at most once per
    /// detection episode. The episode ends when the code is evicted.
    OncePerEpisode,
}

/// Engine thresholds, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteParams {
    /// Consecutive-frame votes needed for a confident detection.
    #[serde(default = "default_required")]
    pub required: u32,
    /// Cap on any single code's vote count.
    #[serde(default = "default_max")]
    pub max: u32,
    #[serde(default)]
    pub emission: EmissionPolicy,
}

fn default_required() -> u32 {
    DEFAULT_REQUIRED
}

fn default_max() -> u32 {
    DEFAULT_MAX
}

impl Default for VoteParams {
    fn default() -> Self {
        Self {
            required: DEFAULT_REQUIRED,
            max: DEFAULT_MAX,
            emission: EmissionPolicy::default(),
        }
    }
}

impl VoteParams {
    /// Thresholds with the cap derived as `4 * required`.
    pub fn with_required(required: u32) -> Self {
        Self {
            required,
            max: required.saturating_mul(4),
            ..Self::default()
        }
    }

    pub fn with_emission(mut self, emission: EmissionPolicy) -> Self {
        self.emission = emission;
        self
    }

    pub fn validate(&self) -> Result<(), VoteParamsError> {
        if self.required == 0 {
            return Err(VoteParamsError::RequiredIsZero);
        }
        if self.max < self.required {
            return Err(VoteParamsError::MaxBelowRequired {
                required: self.required,
                max: self.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let params = VoteParams::default();
        assert_eq!(params.required, 20);
        assert_eq!(params.max, 80);
        assert_eq!(params.emission, EmissionPolicy::AnyTracked);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inconsistent_thresholds() {
        let zero = VoteParams {
            required: 0,
            ..VoteParams::default()
        };
        assert_eq!(zero.validate(), Err(VoteParamsError::RequiredIsZero));

        let low_cap = VoteParams {
            required: 10,
            max: 9,
            ..VoteParams::default()
        };
        assert_eq!(
            low_cap.validate(),
            Err(VoteParamsError::MaxBelowRequired {
                required: 10,
                max: 9
            })
        );
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let params: VoteParams =
            serde_json::from_str(r#"{"required": 5, "emission": "once_per_episode"}"#)
                .expect("json");
        assert_eq!(params.required, 5);
        assert_eq!(params.max, DEFAULT_MAX);
        assert_eq!(params.emission, EmissionPolicy::OncePerEpisode);
    }
}
