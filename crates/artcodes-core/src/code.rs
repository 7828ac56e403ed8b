use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between region values in the canonical Artcodes code form.
pub const REGION_SEPARATOR: char = ':';

/// Errors returned when a code is interpreted as a list of region dot counts.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionCodeError {
    #[error("marker code is empty")]
    Empty,
    #[error("region {index} is not a dot count: {value:?}")]
    InvalidRegion { index: usize, value: String },
}

/// Identifier of one decoded marker instance.
///
/// The engine treats codes as opaque strings compared by exact equality.
/// Artcodes decoders conventionally produce the sorted per-region dot counts
/// joined by `:`; [`MarkerCode::from_regions`] builds that form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkerCode(String);

impl MarkerCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Build the canonical code from per-region dot counts.
    ///
    /// Regions are sorted, so `[3, 1, 2]` and `[1, 2, 3]` give the same code.
    pub fn from_regions(regions: &[u32]) -> Self {
        let mut sorted = regions.to_vec();
        sorted.sort_unstable();
        let parts: Vec<String> = sorted.iter().map(u32::to_string).collect();
        Self(parts.join(&REGION_SEPARATOR.to_string()))
    }

    /// Parse the code back into region dot counts.
    pub fn regions(&self) -> Result<Vec<u32>, RegionCodeError> {
        if self.0.is_empty() {
            return Err(RegionCodeError::Empty);
        }
        self.0
            .split(REGION_SEPARATOR)
            .enumerate()
            .map(|(index, part)| {
                part.parse::<u32>()
                    .map_err(|_| RegionCodeError::InvalidRegion {
                        index,
                        value: part.to_string(),
                    })
            })
            .collect()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MarkerCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for MarkerCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MarkerCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for MarkerCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// Marker codes recognized in one video frame.
///
/// Duplicates are meaningful: two marker instances decoding to the same code
/// contribute two votes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Source frame index, when the producer tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
    #[serde(default)]
    pub codes: Vec<MarkerCode>,
}

impl FrameObservation {
    pub fn new<I, C>(codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<MarkerCode>,
    {
        Self {
            frame: None,
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Observation for a frame in which nothing was decoded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_frame(mut self, frame: u64) -> Self {
        self.frame = Some(frame);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MarkerCode> {
        self.codes.iter()
    }
}

impl<'a> IntoIterator for &'a FrameObservation {
    type Item = &'a MarkerCode;
    type IntoIter = std::slice::Iter<'a, MarkerCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_are_sorted_into_canonical_form() {
        let code = MarkerCode::from_regions(&[3, 1, 5, 1, 2]);
        assert_eq!(code.as_str(), "1:1:2:3:5");
        assert_eq!(code.regions(), Ok(vec![1, 1, 2, 3, 5]));
    }

    #[test]
    fn non_region_codes_report_offending_part() {
        let code = MarkerCode::new("1:x:2");
        assert_eq!(
            code.regions(),
            Err(RegionCodeError::InvalidRegion {
                index: 1,
                value: "x".to_string()
            })
        );
        assert_eq!(MarkerCode::new("").regions(), Err(RegionCodeError::Empty));
    }

    #[test]
    fn observation_deserializes_plain_code_strings() {
        let obs: FrameObservation =
            serde_json::from_str(r#"{"frame": 7, "codes": ["A", "B", "B"]}"#).expect("json");
        assert_eq!(obs.frame, Some(7));
        assert_eq!(obs.len(), 3);
        assert_eq!(obs.codes[1], MarkerCode::from("B"));

        let empty: FrameObservation = serde_json::from_str("{}").expect("json");
        assert!(empty.is_empty());
    }
}
