use comfy_table::{ContentArrangement, Table};

use pantheon_core::Catalog;
use pantheon_rules::RankResolver;

pub fn run(catalog: &Catalog) -> Result<(), String> {
    let resolver = RankResolver::new(&catalog.ranks);

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Rank",
        "Name",
        "Tier",
        "Victories",
        "Favor",
        "Essence",
        "Modifiers",
    ]);

    for tier in catalog.ranks.tiers() {
        let reward = resolver.reward_for_rank(tier.rank);
        table.add_row(vec![
            tier.rank.to_string(),
            tier.name.clone(),
            tier.tier.to_string(),
            tier.victory_threshold.to_string(),
            reward.favor_tokens.to_string(),
            reward.essence_crystals.to_string(),
            super::mark(resolver.carries_modifiers(tier.rank)).to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}
