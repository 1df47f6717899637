use std::path::Path;

use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pantheon_core::{Catalog, God};
use pantheon_rules::{MemoryStore, RunFlow, RunOutcome, RunRequest, RunStart};

pub fn run(
    catalog: &Catalog,
    profile: &Path,
    god: &str,
    rank: u8,
    outcome: RunOutcome,
    seed: u64,
) -> Result<(), String> {
    let god = God::parse(god).ok_or_else(|| format!("unknown god: \"{god}\""))?;
    let progress = super::load_or_fresh_profile(profile)?;

    let mut store = MemoryStore::new(progress);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut flow = RunFlow::new(catalog, &mut store);

    let preview = match flow
        .start_run(RunRequest::new(god, rank), &mut rng)
        .map_err(|e| format!("failed to start run: {e}"))?
    {
        RunStart::Started(preview) => preview,
        RunStart::Refused(refusal) => return Err(format!("run refused: {refusal}")),
    };

    println!(
        "  {} {} at rank {} {}",
        "Run".bold(),
        god,
        rank,
        format!("({})", preview.run.id).dimmed()
    );
    if preview.run.active_modifiers.is_empty() {
        println!("  Modifiers: {}", "(none)".dimmed());
    } else {
        let names: Vec<_> = preview
            .run
            .active_modifiers
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        println!("  Modifiers: {}", names.join(", "));
    }

    let summary = flow
        .complete_run(preview.run.id, outcome)
        .map_err(|e| format!("failed to complete run: {e}"))?;

    match summary.outcome {
        RunOutcome::Victory => println!(
            "  {} +{} favor, +{} essence",
            "Victory!".green().bold(),
            summary.reward.favor_tokens,
            summary.reward.essence_crystals
        ),
        RunOutcome::Defeat => println!(
            "  {} {} li{} left",
            "Defeat.".red().bold(),
            summary.lives,
            if summary.lives == 1 { "fe" } else { "ves" }
        ),
    }
    if summary.rank_unlocked() {
        println!(
            "  {} rank {} unlocked",
            "New".yellow().bold(),
            summary.rank_after
        );
    }
    match summary.progress.next {
        Some(next) => println!(
            "  Rank {}, {} more victor{} to rank {next}",
            summary.rank_after,
            summary.progress.victories_needed,
            if summary.progress.victories_needed == 1 { "y" } else { "ies" }
        ),
        None => println!("  Rank {}, the highest rank", summary.rank_after),
    }

    super::save_profile(profile, store.profile())
}
