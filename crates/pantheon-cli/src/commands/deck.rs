use colored::Colorize;

use pantheon_core::Catalog;
use pantheon_rules::{DeckBuilder, DeckCard};

pub fn run(catalog: &Catalog, costs: &[i32], budget: Option<u32>) -> Result<(), String> {
    let mut deck = match budget {
        Some(points) => DeckBuilder::new(points),
        None => DeckBuilder::from_settings(&catalog.settings),
    };

    let mut refused = 0;
    for (i, &cost) in costs.iter().enumerate() {
        let card = DeckCard::new(format!("card{}", i + 1), format!("Card {}", i + 1), cost);
        let points = card.point_cost();
        if deck.add(card) {
            println!("  {} card {} (cost {cost}, {points} pt)", "+".green(), i + 1);
        } else {
            println!(
                "  {} card {} (cost {cost}, {points} pt) does not fit",
                "x".red(),
                i + 1
            );
            refused += 1;
        }
    }

    println!();
    println!(
        "  Points: {}/{} used, {} left",
        deck.points_used(),
        deck.total_points(),
        deck.points_remaining()
    );
    println!("  Cards:  {} added, {} refused", deck.len(), refused);

    Ok(())
}
