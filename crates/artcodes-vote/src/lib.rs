//! Temporal voting engine for Artcodes marker detection.
//!
//! A marker decoder reports the codes it recognized in every video frame.
//! Single-frame decodes are noisy, so the engine only trusts a code once it
//! has been seen in many *consecutive* frames, and reports one winning code
//! per frame to a [`CodeSink`].
//!
//! ## Quickstart
//!
//! ```
//! use artcodes_vote::{EmissionPolicy, RecordingSink, VoteEngine, VoteParams};
//!
//! let params = VoteParams::default().with_emission(EmissionPolicy::RequireThreshold);
//! let mut engine = VoteEngine::new(params, RecordingSink::new()).unwrap();
//!
//! for _ in 0..20 {
//!     engine.observe_frame(["1:1:2:3:5"]);
//! }
//! assert_eq!(engine.count("1:1:2:3:5"), 20);
//! assert_eq!(engine.sink().len(), 1);
//!
//! // One missed frame forfeits every vote.
//! engine.observe_frame(std::iter::empty::<&str>());
//! assert_eq!(engine.count("1:1:2:3:5"), 0);
//! ```

mod counter;
mod engine;
pub mod io;
mod params;
mod select;
mod sink;

pub use counter::VoteCounter;
pub use engine::{FrameDecision, VoteEngine};
pub use params::{EmissionPolicy, VoteParams, VoteParamsError, DEFAULT_MAX, DEFAULT_REQUIRED};
pub use select::{meets_emission_condition, select, Selection};
pub use sink::{CodeSink, NullSink, RecordingSink};

pub use artcodes_core::{FrameObservation, MarkerCode};
