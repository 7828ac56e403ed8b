//! JSON configuration and report helpers for replaying recorded frame logs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use artcodes_core::{FrameObservation, MarkerCode};
use serde::{Deserialize, Serialize};

use crate::engine::FrameDecision;
use crate::params::{EmissionPolicy, VoteParams};

#[derive(thiserror::Error, Debug)]
pub enum ReplayIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A recorded stream of frame observations plus the engine settings to replay
/// it with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayConfig {
    #[serde(default)]
    pub params: VoteParams,
    #[serde(default)]
    pub frames: Vec<FrameObservation>,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl ReplayConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReplayIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReplayIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("artcodes_replay_report.json"))
    }

    /// Apply overrides on top of the loaded params.
    pub fn apply_overrides(
        &mut self,
        required: Option<u32>,
        max: Option<u32>,
        emission: Option<EmissionPolicy>,
    ) {
        if let Some(required) = required {
            self.params.required = required;
        }
        if let Some(max) = max {
            self.params.max = max;
        }
        if let Some(emission) = emission {
            self.params.emission = emission;
        }
    }
}

/// Decision for one replayed frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameRecord {
    /// Position in the replayed log (0-based).
    pub index: usize,
    /// Source frame index carried by the observation, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame: Option<u64>,
    pub observed: usize,
    pub tracked: usize,
    #[serde(flatten)]
    pub decision: FrameDecision,
}

/// Result of replaying a frame log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayReport {
    pub config_path: Option<String>,
    pub params: VoteParams,
    pub num_frames: usize,
    /// Emitted codes in order, one entry per sink call.
    pub emissions: Vec<MarkerCode>,
    pub frames: Vec<FrameRecord>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ReplayReport {
    pub fn new(params: VoteParams, config_path: Option<&Path>) -> Self {
        Self {
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            params,
            num_frames: 0,
            emissions: Vec::new(),
            frames: Vec::new(),
            error: None,
        }
    }

    /// Append the decision for the next replayed frame.
    pub fn push(&mut self, observation: &FrameObservation, tracked: usize, decision: FrameDecision) {
        if let Some(code) = decision.emitted_code() {
            self.emissions.push(code.clone());
        }
        self.frames.push(FrameRecord {
            index: self.frames.len(),
            frame: observation.frame,
            observed: observation.len(),
            tracked,
            decision,
        });
        self.num_frames = self.frames.len();
    }

    /// Record an error that stopped the replay.
    pub fn set_error(&mut self, err: impl std::fmt::Display) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ReplayIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReplayIoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("replay.json");
        let cfg = ReplayConfig {
            params: VoteParams::with_required(3),
            frames: vec![
                FrameObservation::new(["A"]),
                FrameObservation::empty().with_frame(9),
            ],
            output_path: None,
        };
        cfg.write_json(&path).expect("write");

        let loaded = ReplayConfig::load_json(&path).expect("load");
        assert_eq!(loaded.params, cfg.params);
        assert_eq!(loaded.frames, cfg.frames);
        assert_eq!(loaded.output_path(), PathBuf::from("artcodes_replay_report.json"));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut cfg = ReplayConfig::default();
        cfg.apply_overrides(Some(4), None, Some(EmissionPolicy::RequireThreshold));
        assert_eq!(cfg.params.required, 4);
        assert_eq!(cfg.params.max, 80);
        assert_eq!(cfg.params.emission, EmissionPolicy::RequireThreshold);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ReplayConfig::load_json("/nonexistent/artcodes/replay.json").unwrap_err();
        assert!(matches!(err, ReplayIoError::Io(_)));
    }
}
