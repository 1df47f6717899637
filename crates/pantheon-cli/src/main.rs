//! CLI frontend for the Pantheon progression engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use pantheon_rules::RunOutcome;

#[derive(Parser)]
#[command(
    name = "pantheon",
    about = "Pantheon: inspect divine ranks, modifiers, and unlocks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Catalog JSON file (default: the built-in sample catalog)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every rank tier with its threshold and reward
    Ranks,

    /// Show the rank reached with a number of victories
    Rank {
        /// Lifetime victories
        victories: u32,
    },

    /// Draw the modifiers for a run at a rank
    Modifiers {
        /// Divine rank of the run
        #[arg(short, long)]
        rank: u8,

        /// RNG seed for a reproducible draw
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Show which companions a profile owns and can equip
    Companions {
        /// Profile JSON file (default: a fresh profile)
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Show which talent tiers are open for each god
    Talents {
        /// Profile JSON file (default: a fresh profile)
        #[arg(short, long)]
        profile: Option<PathBuf>,
    },

    /// Check a custom deck against the point budget
    Deck {
        /// Energy cost of each card, in the order they are added
        #[arg(allow_negative_numbers = true, required = true)]
        costs: Vec<i32>,

        /// Point budget (default: from the catalog settings)
        #[arg(short, long)]
        budget: Option<u32>,
    },

    /// Buy a companion with favor tokens
    Buy {
        /// Profile JSON file, updated in place (created if missing)
        #[arg(short, long)]
        profile: PathBuf,

        /// Companion id
        companion: String,
    },

    /// Equip an unlocked companion
    Equip {
        /// Profile JSON file, updated in place (created if missing)
        #[arg(short, long)]
        profile: PathBuf,

        /// Companion id
        companion: String,
    },

    /// Unequip a companion
    Unequip {
        /// Profile JSON file, updated in place (created if missing)
        #[arg(short, long)]
        profile: PathBuf,

        /// Companion id
        companion: String,
    },

    /// Pick a talent for a god at an unlocked tier
    Talent {
        /// Profile JSON file, updated in place (created if missing)
        #[arg(short, long)]
        profile: PathBuf,

        /// God (case-insensitive)
        #[arg(short, long)]
        god: String,

        /// Talent tier, 1 to 4
        #[arg(short, long)]
        tier: u8,

        /// Talent key
        key: String,
    },

    /// Play out one run against a profile file and save the result
    Play {
        /// Profile JSON file, updated in place (created if missing)
        #[arg(short, long)]
        profile: PathBuf,

        /// God to play (case-insensitive)
        #[arg(short, long)]
        god: String,

        /// Divine rank of the run
        #[arg(short, long, default_value = "0")]
        rank: u8,

        /// How the run ends
        #[arg(short, long, value_enum)]
        outcome: OutcomeArg,

        /// RNG seed for the modifier draw
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutcomeArg {
    Victory,
    Defeat,
}

impl From<OutcomeArg> for RunOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Victory => RunOutcome::Victory,
            OutcomeArg::Defeat => RunOutcome::Defeat,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = commands::load_catalog(cli.catalog.as_deref()).and_then(|catalog| {
        match cli.command {
            Commands::Ranks => commands::ranks::run(&catalog),
            Commands::Rank { victories } => commands::rank::run(&catalog, victories),
            Commands::Modifiers { rank, seed } => commands::modifiers::run(&catalog, rank, seed),
            Commands::Companions { profile } => {
                commands::companions::run(&catalog, profile.as_deref())
            }
            Commands::Talents { profile } => commands::talents::run(&catalog, profile.as_deref()),
            Commands::Deck { costs, budget } => commands::deck::run(&catalog, &costs, budget),
            Commands::Buy { profile, companion } => {
                commands::unlock::buy(&catalog, &profile, &companion)
            }
            Commands::Equip { profile, companion } => {
                commands::unlock::equip(&catalog, &profile, &companion)
            }
            Commands::Unequip { profile, companion } => {
                commands::unlock::unequip(&catalog, &profile, &companion)
            }
            Commands::Talent {
                profile,
                god,
                tier,
                key,
            } => commands::unlock::talent(&catalog, &profile, &god, tier, &key),
            Commands::Play {
                profile,
                god,
                rank,
                outcome,
                seed,
            } => commands::play::run(&catalog, &profile, &god, rank, outcome.into(), seed),
        }
    });

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
