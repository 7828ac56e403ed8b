//! Selection step: pick the most-voted code and decide whether to emit it.

use artcodes_core::MarkerCode;
use serde::{Deserialize, Serialize};

use crate::counter::VoteCounter;
use crate::params::EmissionPolicy;

/// The code that currently leads the vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub code: MarkerCode,
    pub count: u32,
}

/// Pick the code with the strictly highest count.
///
/// Codes are scanned in first-tracked order and a later code only wins with a
/// strictly greater count, so ties go to the code tracked earliest.
pub fn select(counter: &VoteCounter) -> Option<Selection> {
    let mut best = 0u32;
    let mut selected: Option<&MarkerCode> = None;
    for (code, count) in counter.iter() {
        if count > best {
            selected = Some(code);
            best = count;
        }
    }
    selected.map(|code| Selection {
        code: code.clone(),
        count: best,
    })
}

/// Threshold part of the emission condition.
///
/// `OncePerEpisode` shares the `RequireThreshold` rule here; the per-episode
/// suppression is stateful and lives in the engine.
pub fn meets_emission_condition(
    policy: EmissionPolicy,
    selection: Option<&Selection>,
    required: u32,
) -> bool {
    let best = selection.map_or(0, |s| s.count);
    match policy {
        EmissionPolicy::AnyTracked => selection.is_some() || best >= required,
        EmissionPolicy::RequireThreshold | EmissionPolicy::OncePerEpisode => {
            selection.is_some() && best >= required
        }
    }
}
