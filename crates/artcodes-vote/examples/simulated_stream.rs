//! Feed a simulated, noisy decoder stream through the voting engine and log
//! every confirmed code.

use artcodes_core::{init_with_level, MarkerCode};
use artcodes_vote::{EmissionPolicy, VoteEngine, VoteParams};
use log::{info, LevelFilter};

/// Stand-in for an image-based marker decoder: a steady marker with an
/// occasional missed frame plus a spurious single-frame misread.
fn decode_frame(frame: u64) -> Vec<MarkerCode> {
    let mut codes = Vec::new();
    if frame % 37 != 36 {
        codes.push(MarkerCode::from_regions(&[1, 1, 2, 3, 5]));
    }
    if frame % 13 == 0 {
        codes.push(MarkerCode::from_regions(&[1, 2, 2]));
    }
    codes
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let params = VoteParams::default().with_emission(EmissionPolicy::OncePerEpisode);
    let mut engine = VoteEngine::new(params, |code: &MarkerCode| {
        info!("detected marker {code}");
    })?;

    for frame in 0..200 {
        engine.observe_frame(decode_frame(frame));
    }
    info!("processed {} frames", engine.frames_observed());
    Ok(())
}
