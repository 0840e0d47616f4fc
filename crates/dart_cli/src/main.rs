//! dartsim CLI
//!
//! Headless driver for dart_core: AI-vs-AI matches, checkout lookups and
//! throw distributions.
//!
//! `RUST_LOG=dart_core=debug dartsim simulate` prints every dart.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use dart_core::ai::throw_at;
use dart_core::checkout::{self, CHECKOUT_TABLE};
use dart_core::engine::SummaryStats;
use dart_core::{AimTarget, Match, MatchConfig, MatchResult, PlayerConfig, Segment};

#[derive(Parser)]
#[command(name = "dartsim")]
#[command(about = "Simulate darts matches and inspect the scoring engine", long_about = None)]
#[command(version = dart_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    X01,
    Cricket,
}

#[derive(Subcommand)]
enum Commands {
    /// Play AI-vs-AI matches
    Simulate {
        /// Game mode (ignored with --config)
        #[arg(long, value_enum, default_value = "x01")]
        mode: Mode,

        /// X01 start score
        #[arg(long, default_value = "501")]
        start: u32,

        /// Skill of each player (1-10)
        #[arg(long, num_args = 2, default_values_t = [7u8, 7u8])]
        skill: Vec<u8>,

        /// Number of matches
        #[arg(long, default_value = "1")]
        matches: u32,

        /// Base seed; match i uses seed + i
        #[arg(long)]
        seed: Option<u64>,

        /// Match config JSON; both players must be AI
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print each result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Show the checkout for a score, or the whole table
    Checkout {
        /// Remaining score (2-170)
        score: Option<u32>,
    },

    /// Sample where darts land for a target and skill
    Throw {
        /// Target label, e.g. T20, D16, 25, BULL
        #[arg(long, default_value = "T20")]
        target: String,

        /// Skill (1-10)
        #[arg(long, default_value = "8")]
        skill: u8,

        /// Number of darts
        #[arg(long, default_value = "10000")]
        trials: u32,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { mode, start, skill, matches, seed, config, json } => {
            let base = match config {
                Some(path) => {
                    let raw = std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?;
                    MatchConfig::from_json_str(&raw)?
                }
                None => {
                    let config = match mode {
                        Mode::X01 => MatchConfig::x01(start),
                        Mode::Cricket => MatchConfig::cricket(),
                    };
                    config.with_players(PlayerConfig::ai("Left", skill[0]), PlayerConfig::ai("Right", skill[1]))
                }
            };
            let base = base.apply_env_overrides();
            simulate(base, matches, seed, json)?;
        }

        Commands::Checkout { score } => match score {
            Some(score) => match checkout::lookup(score) {
                Some(finish) => println!("{:>3}: {}", score, finish.label()),
                None => println!("{:>3}: no checkout", score),
            },
            None => {
                for (score, finish) in CHECKOUT_TABLE.iter() {
                    println!("{:>3}: {}", score, finish.label());
                }
                println!("\n{} finishes", CHECKOUT_TABLE.len());
            }
        },

        Commands::Throw { target, skill, trials, seed } => {
            throw_histogram(parse_target(&target)?, skill, trials, seed)?;
        }
    }

    Ok(())
}

fn simulate(base: MatchConfig, matches: u32, seed: Option<u64>, json: bool) -> Result<()> {
    let mut wins = [0u32; 2];

    for i in 0..matches {
        let mut config = base.clone();
        config.ai_dart_delay_ms = 0;
        if let Some(seed) = seed.or(base.seed) {
            config.seed = Some(seed.wrapping_add(i as u64));
        }

        let mut m = Match::new(config)?;
        if (0..2).any(|p| !m.is_ai_player(p)) {
            bail!("simulate needs two AI players");
        }
        while !m.is_over() {
            m.run_ai_turn()?;
        }

        let result = m.result().context("finished match has no result")?;
        wins[result.winner] += 1;
        if json {
            println!("{}", result.to_json()?);
        } else {
            print_result(i + 1, &result);
        }
    }

    if matches > 1 {
        println!("\nWins: {} {} - {} {}", base.players[0].name, wins[0], wins[1], base.players[1].name);
    }
    Ok(())
}

fn print_result(index: u32, result: &MatchResult) {
    println!("Match {} ({}): {} wins", index, result.mode.name(), result.winner_name);
    for p in &result.players {
        match &p.stats {
            SummaryStats::X01 { remaining, stats } => println!(
                "   {:<8} left {:>3}  avg {:>6.2}  180s {}  checkout {:.0}%  darts {}",
                p.name,
                remaining,
                stats.average_per_turn,
                stats.count_180,
                stats.checkout_percentage(),
                p.darts_thrown
            ),
            SummaryStats::Cricket { points, stats, .. } => println!(
                "   {:<8} points {:>4}  mpr {:.2}  darts {}",
                p.name, points, stats.mpr, p.darts_thrown
            ),
        }
    }
}

/// Board zone to aim at; a miss is not a target.
fn parse_target(label: &str) -> Result<AimTarget> {
    let seg: Segment = label.parse()?;
    if seg.is_miss() {
        bail!("--target {} is not a scoring zone", label);
    }
    Ok(AimTarget::from(seg))
}

fn throw_histogram(target: AimTarget, skill: u8, trials: u32, seed: u64) -> Result<()> {
    if trials == 0 {
        bail!("--trials must be positive");
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut counts: HashMap<Segment, u32> = HashMap::new();
    for _ in 0..trials {
        *counts.entry(throw_at(target, skill, &mut rng)).or_default() += 1;
    }

    let mut rows: Vec<(Segment, u32)> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(&b.0.label())));

    println!("Aiming at {} with skill {} ({} darts)", target, skill, trials);
    for (seg, count) in rows.iter().take(15) {
        let pct = *count as f64 / trials as f64 * 100.0;
        println!("   {:>5} {:>6} {:>6.2}%", seg.label(), count, pct);
    }
    Ok(())
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_target() {
        assert_eq!(parse_target("T20").unwrap(), AimTarget::treble(20));
        assert_eq!(parse_target("bull").unwrap(), AimTarget::inner_bull());
        assert_eq!(parse_target("25").unwrap(), AimTarget::outer_bull());
    }

    #[test]
    fn test_parse_target_rejects_miss_and_bad_labels() {
        assert!(parse_target("MISS").is_err());
        assert!(parse_target("0").is_err());
        assert!(parse_target("T25").is_err());
        assert!(parse_target("D21").is_err());
    }
}
