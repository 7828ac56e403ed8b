//! Temporal marker voting engine.
//!
//! Turns a noisy per-frame stream of decoded marker codes into a debounced
//! "best current code" signal:
//! 1. every occurrence of a code in the frame adds one vote (capped at `max`),
//! 2. any code missing from the frame loses all of its votes at once,
//! 3. the most-voted code is selected and, if the emission policy allows,
//!    forwarded to the [`CodeSink`].
//!
//! A code therefore has to be decoded in `required` consecutive frames before
//! it reaches the threshold; a single miss restarts it from zero.

use std::collections::HashSet;

use artcodes_core::{FrameObservation, MarkerCode};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::counter::VoteCounter;
use crate::params::{EmissionPolicy, VoteParams, VoteParamsError};
use crate::select::{meets_emission_condition, select, Selection};
use crate::sink::{CodeSink, NullSink};

/// Outcome of one [`VoteEngine::observe_frame`] call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDecision {
    /// Code leading the vote after this frame, if any code is tracked.
    pub selected: Option<Selection>,
    /// Whether `selected` was forwarded to the sink.
    pub emitted: bool,
    /// Whether `selected` reached `required` votes on this frame for the
    /// first time in its current episode.
    #[serde(default)]
    pub confirmed: bool,
}

impl FrameDecision {
    /// The emitted code, if the sink was invoked.
    pub fn emitted_code(&self) -> Option<&MarkerCode> {
        self.selected
            .as_ref()
            .filter(|_| self.emitted)
            .map(|s| &s.code)
    }
}

/// Debouncing vote engine for one detection stream.
///
/// Calls must be made once per processed frame, in frame order. Taking
/// `&mut self` keeps calls serialized; share an engine across threads only
/// behind a lock.
pub struct VoteEngine<S = NullSink> {
    params: VoteParams,
    counter: VoteCounter,
    /// Codes that reached `required` while leading, until they are evicted.
    confirmed: HashSet<MarkerCode>,
    frames: u64,
    sink: S,
}

impl VoteEngine<NullSink> {
    /// Engine without a sink; inspect the returned [`FrameDecision`]s instead.
    pub fn detached(params: VoteParams) -> Result<Self, VoteParamsError> {
        Self::new(params, NullSink)
    }
}

impl<S: CodeSink> VoteEngine<S> {
    pub fn new(params: VoteParams, sink: S) -> Result<Self, VoteParamsError> {
        params.validate()?;
        Ok(Self {
            params,
            counter: VoteCounter::new(),
            confirmed: HashSet::new(),
            frames: 0,
            sink,
        })
    }

    /// Engine with default thresholds (`required = 20`, `max = 80`).
    pub fn with_defaults(sink: S) -> Self {
        Self {
            params: VoteParams::default(),
            counter: VoteCounter::new(),
            confirmed: HashSet::new(),
            frames: 0,
            sink,
        }
    }

    pub fn params(&self) -> &VoteParams {
        &self.params
    }

    pub fn counter(&self) -> &VoteCounter {
        &self.counter
    }

    /// Current vote count for `code`, `0` when untracked.
    pub fn count(&self, code: &str) -> u32 {
        self.counter.count(code)
    }

    /// Number of frames observed since construction or the last reset.
    pub fn frames_observed(&self) -> u64 {
        self.frames
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Drop all votes and episode state, as if the engine were recreated.
    pub fn reset(&mut self) {
        self.counter.clear();
        self.confirmed.clear();
        self.frames = 0;
        debug!("vote engine reset");
    }

    /// Process the codes decoded in one frame.
    ///
    /// Duplicates count once per occurrence. An empty frame is valid and
    /// evicts every tracked code. The sink is invoked at most once.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "trace", skip(self, codes), fields(frame = self.frames))
    )]
    pub fn observe_frame<I, C>(&mut self, codes: I) -> FrameDecision
    where
        I: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        self.frames += 1;
        let evicted = self.counter.record_frame(codes, self.params.max);
        for code in &evicted {
            debug!("code {code} lost after frame gap");
            self.confirmed.remove(code);
        }

        let selected = select(&self.counter);
        let confirmed = match &selected {
            Some(selection) if selection.count >= self.params.required => {
                self.confirmed.insert(selection.code.clone())
            }
            _ => false,
        };
        let mut emitted =
            meets_emission_condition(self.params.emission, selected.as_ref(), self.params.required);
        if self.params.emission == EmissionPolicy::OncePerEpisode {
            emitted &= confirmed;
        }

        trace!(
            "frame {}: tracked={} selected={:?} emitted={}",
            self.frames,
            self.counter.len(),
            selected.as_ref().map(|s| (s.code.as_str(), s.count)),
            emitted
        );

        if let Some(selection) = &selected {
            if confirmed {
                debug!("code {} confirmed ({} votes)", selection.code, selection.count);
            }
            if emitted {
                self.sink.on_marker_code_detected(&selection.code);
            }
        }

        FrameDecision {
            selected,
            emitted,
            confirmed,
        }
    }

    /// Process a [`FrameObservation`] produced by a marker decoder.
    pub fn observe(&mut self, observation: &FrameObservation) -> FrameDecision {
        self.observe_frame(observation)
    }
}
