use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use pantheon_core::Catalog;
use pantheon_rules::{RankResolver, UnlockGate};

pub fn run(catalog: &Catalog, profile: Option<&Path>) -> Result<(), String> {
    let progress = super::load_profile(profile)?;
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);

    if catalog.companions.is_empty() {
        println!("  No companions in catalog.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Id",
        "Name",
        "Unlock",
        "Cost",
        "Unlocked",
        "Equipped",
        "Equippable",
    ]);

    for companion in &catalog.companions {
        table.add_row(vec![
            companion.id.clone(),
            companion.name.clone(),
            companion.unlock_condition.to_string(),
            companion.unlock_cost.to_string(),
            super::mark(gate.is_companion_unlocked(companion, &progress)).to_string(),
            super::mark(progress.is_equipped(&companion.id)).to_string(),
            super::mark(gate.can_equip(companion, &progress)).to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  Slots: {}/{} used",
        progress.equipped_companions.len(),
        gate.companion_slots(&progress)
    );

    Ok(())
}
