use std::path::Path;

use crate::core::FrameObservation;
use crate::vote::io::{ReplayConfig, ReplayIoError, ReplayReport};
use crate::vote::{VoteEngine, VoteParams, VoteParamsError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the replay helpers.
#[derive(thiserror::Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Io(#[from] ReplayIoError),

    #[error("invalid vote parameters: {0}")]
    Params(#[from] VoteParamsError),
}

/// Run a recorded frame log through a fresh engine.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(params, frames, config_path), fields(frames = frames.len()))
)]
pub fn replay_frames(
    params: VoteParams,
    frames: &[FrameObservation],
    config_path: Option<&Path>,
) -> Result<ReplayReport, VoteParamsError> {
    let mut engine = VoteEngine::detached(params)?;
    let mut report = ReplayReport::new(params, config_path);
    for observation in frames {
        let decision = engine.observe(observation);
        report.push(observation, engine.counter().len(), decision);
    }
    log::info!(
        "replayed {} frames, {} emissions",
        report.num_frames,
        report.emissions.len()
    );
    Ok(report)
}

/// Replay the frames of an already loaded config.
pub fn replay_config(
    cfg: &ReplayConfig,
    config_path: Option<&Path>,
) -> Result<ReplayReport, ReplayError> {
    Ok(replay_frames(cfg.params, &cfg.frames, config_path)?)
}

/// Load a replay config from disk and replay it.
pub fn replay_file(path: impl AsRef<Path>) -> Result<(ReplayConfig, ReplayReport), ReplayError> {
    let path = path.as_ref();
    let cfg = ReplayConfig::load_json(path)?;
    let report = replay_config(&cfg, Some(path))?;
    Ok((cfg, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::EmissionPolicy;

    fn frames(runs: &[(&str, usize)]) -> Vec<FrameObservation> {
        runs.iter()
            .flat_map(|&(code, n)| {
                std::iter::repeat_with(move || {
                    if code.is_empty() {
                        FrameObservation::empty()
                    } else {
                        FrameObservation::new([code])
                    }
                })
                .take(n)
            })
            .collect()
    }

    #[test]
    fn replay_reports_every_frame_and_emission() {
        let params = VoteParams::with_required(3).with_emission(EmissionPolicy::RequireThreshold);
        let log = frames(&[("A", 4), ("", 1), ("B", 2)]);
        let report = replay_frames(params, &log, None).expect("replay");

        assert_eq!(report.num_frames, 7);
        let codes: Vec<&str> = report.emissions.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["A", "A"]);
        assert_eq!(report.frames[4].tracked, 0);
        assert!(report.frames[4].decision.selected.is_none());
        assert_eq!(report.frames[6].decision.selected.as_ref().map(|s| s.count), Some(2));
    }

    #[test]
    fn replay_rejects_invalid_params() {
        let params = VoteParams {
            required: 0,
            ..VoteParams::default()
        };
        let err = replay_frames(params, &[], None).unwrap_err();
        assert_eq!(err, VoteParamsError::RequiredIsZero);
    }
}
