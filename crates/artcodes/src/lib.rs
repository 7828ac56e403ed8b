//! High-level facade crate for the `artcodes-*` workspace.
//!
//! This crate provides:
//! - stable re-exports of the marker code types and the voting engine
//! - helpers that replay a recorded frame log (JSON) through the engine
//! - (feature `cli`) the `artcodes` binary wrapping those helpers
//!
//! ## Quickstart
//!
//! ```
//! use artcodes::{FrameObservation, VoteParams};
//! use artcodes::replay::replay_frames;
//!
//! let frames: Vec<FrameObservation> =
//!     (0..25).map(|_| FrameObservation::new(["1:1:2:3"])).collect();
//! let report = replay_frames(VoteParams::default(), &frames, None).unwrap();
//! assert_eq!(report.num_frames, 25);
//! assert_eq!(report.frames[24].decision.selected.as_ref().unwrap().count, 25);
//! ```
//!
//! ## API map
//! - `artcodes::core`: marker codes, frame observations, logger setup.
//! - `artcodes::vote`: vote counter, selection step, engine, JSON replay I/O.
//! - `artcodes::replay`: end-to-end replay of recorded frame logs.

pub use artcodes_core as core;
pub use artcodes_vote as vote;

pub use artcodes_core::{FrameObservation, MarkerCode};
pub use artcodes_vote::{
    CodeSink, EmissionPolicy, FrameDecision, RecordingSink, VoteEngine, VoteParams,
};

pub mod replay;
