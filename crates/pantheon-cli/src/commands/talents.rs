use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use pantheon_core::{Catalog, God, TalentTier};
use pantheon_rules::{RankResolver, UnlockGate};

pub fn run(catalog: &Catalog, profile: Option<&Path>) -> Result<(), String> {
    let progress = super::load_profile(profile)?;
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);

    let mut header = vec!["God".to_string(), "Runs".to_string()];
    header.extend(
        TalentTier::ALL
            .iter()
            .map(|t| format!("{t} ({})", gate.runs_required(*t))),
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);

    for god in God::ALL {
        let mut row = vec![god.to_string(), progress.runs_with(god).to_string()];
        for tier in TalentTier::ALL {
            let cell = if !god.talent_tiers().contains(&tier) {
                "n/a".to_string()
            } else if gate.can_select_talent_tier(god, tier, &progress.god_runs_completed) {
                progress
                    .talents
                    .get(god, tier)
                    .map_or_else(|| "open".to_string(), str::to_string)
            } else {
                "locked".to_string()
            };
            row.push(cell);
        }
        table.add_row(row);
    }

    println!("{table}");
    Ok(())
}
