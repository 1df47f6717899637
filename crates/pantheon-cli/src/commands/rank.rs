use colored::Colorize;

use pantheon_core::Catalog;
use pantheon_rules::RankResolver;

pub fn run(catalog: &Catalog, victories: u32) -> Result<(), String> {
    let resolver = RankResolver::new(&catalog.ranks);
    let progress = resolver.progress_to_next(victories);
    let name = resolver
        .current_tier(victories)
        .map(|t| t.name.as_str())
        .unwrap_or("Unknown");

    println!(
        "  {} {} {}",
        "Rank".bold(),
        progress.current,
        format!("({name})").dimmed()
    );
    println!("  Victories: {victories}");

    match progress.next {
        Some(next) => {
            println!(
                "  Next:      rank {next} in {} victor{}",
                progress.victories_needed,
                if progress.victories_needed == 1 { "y" } else { "ies" }
            );
            println!("  Progress:  {}", progress_bar(progress.progress_percent));
        }
        None => println!("  {}", "Highest rank reached.".green()),
    }

    Ok(())
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 10.0).round() as usize).min(10);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(10 - filled));
    format!("[{}] {:>3.0}%", bar.cyan(), percent)
}
