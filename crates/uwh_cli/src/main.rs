//! uwh-sim CLI
//!
//! Headless underwater hockey matches from the command line: single runs,
//! roster previews, JSON schemas and seed batches.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use uwh_core::engine::{JsonLinesSink, PlayerStatus};
use uwh_core::{
    run_headless, Frame, HeadlessRunner, Match, MatchReport, RunnerOptions, SimConfig,
    StatusSnapshot, Team,
};

#[derive(Parser)]
#[command(name = "uwh-sim")]
#[command(about = "Simulate underwater hockey matches headlessly", long_about = None)]
struct Cli {
    /// Simulation config (YAML or JSON); defaults when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one match and print the report
    Run {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Seconds of RUNNING play to simulate
        #[arg(long, default_value_t = 120)]
        seconds: u32,

        /// Stop once a team reaches this many goals
        #[arg(long)]
        goal_limit: Option<u32>,

        /// Stop at the first goal instead of continuing
        #[arg(long, default_value = "false")]
        no_continue: bool,

        /// Write frames as JSON lines to this file
        #[arg(long)]
        frames: Option<PathBuf>,

        /// Keep every n-th frame in the frames file
        #[arg(long, default_value_t = 1)]
        frame_every: u64,

        /// Print the report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the generated roster for a seed
    Roster {
        #[arg(long, default_value_t = 1)]
        seed: u64,

        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the JSON schema of an output document
    Schema {
        #[arg(value_enum, default_value_t = SchemaKind::Status)]
        kind: SchemaKind,
    },

    /// Run many seeds in parallel and summarize the results
    Batch {
        /// First seed
        #[arg(long, default_value_t = 1)]
        start: u64,

        /// Number of seeds
        #[arg(long, default_value_t = 32)]
        count: u64,

        #[arg(long, default_value_t = 120)]
        seconds: u32,

        #[arg(long, default_value = "false")]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemaKind {
    Status,
    Frame,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { seed, seconds, goal_limit, no_continue, frames, frame_every, json } => {
            let options =
                RunnerOptions { running_seconds: seconds, goal_limit, auto_continue: !no_continue };
            let game = Match::new(config, seed).context("Failed to build match")?;
            let report = match frames {
                Some(path) => run_with_frames(game, options, &path, frame_every)?,
                None => run_headless(game, options).context("Match aborted")?,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }

        Commands::Roster { seed, json } => {
            let game = Match::new(config, seed).context("Failed to build match")?;
            let status = game.status();
            if json {
                println!("{}", serde_json::to_string_pretty(&status.players)?);
            } else {
                println!("Roster for seed {seed}");
                print_board(&status.players);
            }
        }

        Commands::Schema { kind } => {
            let schema = match kind {
                SchemaKind::Status => schemars::schema_for!(StatusSnapshot),
                SchemaKind::Frame => schemars::schema_for!(Frame),
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }

        Commands::Batch { start, count, seconds, json } => {
            let reports = run_batch(&config, start, count, seconds)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print_batch_summary(&reports);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    match path {
        Some(path) => {
            let config = SimConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            debug!("config loaded from {}", path.display());
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

/// One headless match per seed, in parallel
fn run_batch(config: &SimConfig, start: u64, count: u64, seconds: u32) -> Result<Vec<MatchReport>> {
    let options = RunnerOptions { running_seconds: seconds, ..RunnerOptions::default() };
    info!("running {count} matches from seed {start}");
    (start..start.saturating_add(count))
        .into_par_iter()
        .map(|seed| {
            let game = Match::new(config.clone(), seed)
                .with_context(|| format!("Failed to build match for seed {seed}"))?;
            run_headless(game, options).with_context(|| format!("Seed {seed} aborted"))
        })
        .collect()
}

fn run_with_frames(
    game: Match,
    options: RunnerOptions,
    path: &Path,
    every: u64,
) -> Result<MatchReport> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let sink = JsonLinesSink::new(BufWriter::new(file), every);
    let (report, sink) = HeadlessRunner::with_sink(game, sink, options)
        .run()
        .context("Match aborted")?;
    sink.into_inner().into_inner().context("Failed to flush frames")?;
    info!("frames written to {}", path.display());
    Ok(report)
}

fn print_board(players: &[PlayerStatus]) {
    println!(
        "{:<5} {:<2} {} {:<7} {:<24} {:<22} {:>6} {:>5} {:>4} {:>4}",
        "Team", "Ro", "H", "Depth", "Strategy", "Activity", "Breath", "Max", "Spd", "Flk"
    );
    for p in players {
        println!("{}", p.board_line());
    }
}

fn print_report(report: &MatchReport) {
    println!("Seed {}: White {} - {} Black", report.seed, report.score.white, report.score.black);
    println!(
        "   Running ticks: {} ({} frames)",
        report.running_ticks, report.frames
    );
    println!(
        "   Releases:      {} flicks, {} shots, {} dumps",
        report.releases.flicks, report.releases.shots, report.releases.dumps
    );
    println!("   Possessions:   {}", report.possession_changes);
    for goal in &report.goals {
        println!(
            "   Goal at tick {:>6}: {} ({}-{})",
            goal.tick, goal.team, goal.score.white, goal.score.black
        );
    }
    println!();
    print_board(&report.final_status.players);
}

fn print_batch_summary(reports: &[MatchReport]) {
    let mut white = 0;
    let mut black = 0;
    let mut draws = 0;
    let mut goals = 0u64;
    for r in reports {
        match r.winner() {
            Some(Team::White) => white += 1,
            Some(Team::Black) => black += 1,
            None => draws += 1,
        }
        goals += u64::from(r.score.white + r.score.black);
    }
    let n = reports.len().max(1) as f64;
    println!("Matches:     {}", reports.len());
    println!("White wins:  {white}");
    println!("Black wins:  {black}");
    println!("Draws:       {draws}");
    println!("Goals/match: {:.2}", goals as f64 / n);
}
