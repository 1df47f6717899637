use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;

use pantheon_core::Catalog;
use pantheon_rules::{ModifierSelector, RankResolver};

pub fn run(catalog: &Catalog, rank: u8, seed: u64) -> Result<(), String> {
    let resolver = RankResolver::new(&catalog.ranks);
    if resolver.table().get(rank).is_none() {
        return Err(format!(
            "rank {rank} is not in the rank table (0-{})",
            resolver.table().max_rank()
        ));
    }

    let selector = ModifierSelector::new(resolver, &catalog.settings);
    let mut rng = StdRng::seed_from_u64(seed);
    let set = selector.select(rank, &catalog.modifiers, &mut rng);

    println!(
        "  {} for rank {rank} {}",
        "Modifiers".bold(),
        format!("(seed={seed})").dimmed()
    );

    if set.is_empty() {
        println!("  {}", "(none)".dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Category", "Description"]);
    for m in set.as_slice() {
        table.add_row(vec![
            m.id.clone(),
            m.name.clone(),
            m.category.to_string(),
            m.description.clone(),
        ]);
    }
    println!("{table}");

    Ok(())
}
