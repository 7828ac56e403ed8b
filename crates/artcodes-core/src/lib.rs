//! Core types for Artcodes marker code streams.
//!
//! This crate is intentionally small. It does *not* decode images; it only
//! describes what an upstream marker decoder hands to the voting engine
//! (one [`FrameObservation`] per video frame) and how binaries set up logging.

mod code;
mod logger;

pub use code::{FrameObservation, MarkerCode, RegionCodeError, REGION_SEPARATOR};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
