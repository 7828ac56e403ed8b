use std::path::PathBuf;

use artcodes::replay::replay_config;
use artcodes::vote::io::{ReplayConfig, ReplayReport};
use artcodes::{EmissionPolicy, VoteParams};
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(not(feature = "tracing"))]
use log::LevelFilter;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "artcodes", version, about = "Debounce recorded Artcodes marker streams")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON frame log through the voting engine and write a report.
    Replay(ReplayArgs),
    /// Print the default vote parameters as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Replay config JSON (params + frames).
    config: PathBuf,

    /// Output report path (overrides `output_path` from the config).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Consecutive votes required for a confident detection.
    #[arg(long)]
    required: Option<u32>,

    /// Cap on a single code's vote count.
    #[arg(long)]
    max: Option<u32>,

    /// When the selected code is emitted.
    #[arg(long, value_enum)]
    emission: Option<EmissionArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmissionArg {
    AnyTracked,
    RequireThreshold,
    OncePerEpisode,
}

impl From<EmissionArg> for EmissionPolicy {
    fn from(arg: EmissionArg) -> Self {
        match arg {
            EmissionArg::AnyTracked => EmissionPolicy::AnyTracked,
            EmissionArg::RequireThreshold => EmissionPolicy::RequireThreshold,
            EmissionArg::OncePerEpisode => EmissionPolicy::OncePerEpisode,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
        Command::Defaults => cmd_defaults(),
    }
}

#[cfg(not(feature = "tracing"))]
fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    artcodes::core::init_with_level(level)?;
    Ok(())
}

#[cfg(feature = "tracing")]
fn init_logging(_verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    // The subscriber may already bridge `log`; a second bridge is harmless.
    let _ = tracing_log::LogTracer::init();
    artcodes::core::init_tracing(false);
    Ok(())
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn cmd_replay(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = ReplayConfig::load_json(&args.config)?;
    cfg.apply_overrides(args.required, args.max, args.emission.map(Into::into));
    info!(
        "replaying {} frames (required={}, max={}, emission={:?})",
        cfg.frames.len(),
        cfg.params.required,
        cfg.params.max,
        cfg.params.emission
    );

    let out_path = args.out.unwrap_or_else(|| cfg.output_path());
    let report = match replay_config(&cfg, Some(args.config.as_path())) {
        Ok(report) => report,
        Err(err) => {
            let mut report = ReplayReport::new(cfg.params, Some(args.config.as_path()));
            report.set_error(&err);
            report.write_json(&out_path)?;
            warn!("replay failed, wrote error report to {}", out_path.display());
            return Err(err.into());
        }
    };
    if report.emissions.is_empty() {
        warn!("no marker code emitted");
    }

    report.write_json(&out_path)?;
    println!(
        "wrote report JSON to {} ({} emissions)",
        out_path.display(),
        report.emissions.len()
    );
    Ok(())
}

fn cmd_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(&VoteParams::default())?;
    println!("{json}");
    Ok(())
}
