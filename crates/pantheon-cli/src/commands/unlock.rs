use std::path::Path;

use colored::Colorize;

use pantheon_core::{Catalog, CompanionDefinition, God, PlayerProgress, TalentTier};
use pantheon_rules::{MemoryStore, ProfileStore, ProfileUpdate, RankResolver, UnlockGate};

pub fn buy(catalog: &Catalog, profile: &Path, id: &str) -> Result<(), String> {
    let companion = find_companion(catalog, id)?;
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);
    let original = super::load_or_fresh_profile(profile)?;
    let mut progress = original.clone();

    let outcome = gate.purchase(companion, &mut progress);
    if !outcome.success {
        return Err(if progress.is_unlocked(&companion.id) {
            format!("{} is already owned", companion.name)
        } else {
            format!(
                "{} costs {} favor, balance is {}",
                companion.name, companion.unlock_cost, progress.favor_tokens
            )
        });
    }

    write_back(profile, original, &ProfileUpdate::companions_from(&progress))?;
    println!(
        "  {} {} for {} favor ({} left)",
        "Bought".green().bold(),
        companion.name,
        companion.unlock_cost,
        outcome.new_favor_balance
    );
    Ok(())
}

pub fn equip(catalog: &Catalog, profile: &Path, id: &str) -> Result<(), String> {
    let companion = find_companion(catalog, id)?;
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);
    let original = super::load_or_fresh_profile(profile)?;
    let mut progress = original.clone();

    if !gate.equip(companion, &mut progress) {
        let slots = gate.companion_slots(&progress);
        return Err(if !gate.is_companion_unlocked(companion, &progress) {
            format!("{} is locked ({})", companion.name, companion.unlock_condition)
        } else if progress.is_equipped(&companion.id) {
            format!("{} is already equipped", companion.name)
        } else {
            format!("all {slots} companion slot(s) are in use")
        });
    }

    write_back(profile, original, &ProfileUpdate::companions_from(&progress))?;
    println!(
        "  {} {} ({}/{} slots)",
        "Equipped".green().bold(),
        companion.name,
        progress.equipped_companions.len(),
        gate.companion_slots(&progress)
    );
    Ok(())
}

pub fn unequip(catalog: &Catalog, profile: &Path, id: &str) -> Result<(), String> {
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);
    let original = super::load_or_fresh_profile(profile)?;
    let mut progress = original.clone();

    if !gate.unequip(id, &mut progress) {
        return Err(format!("companion '{id}' is not equipped"));
    }

    write_back(profile, original, &ProfileUpdate::companions_from(&progress))?;
    println!("  {} {id}", "Unequipped".bold());
    Ok(())
}

pub fn talent(
    catalog: &Catalog,
    profile: &Path,
    god: &str,
    tier: u8,
    key: &str,
) -> Result<(), String> {
    let god = God::parse(god).ok_or_else(|| format!("unknown god: \"{god}\""))?;
    let tier = TalentTier::from_number(tier).ok_or_else(|| format!("no talent tier {tier}"))?;
    let gate = UnlockGate::new(RankResolver::new(&catalog.ranks), &catalog.settings);
    let original = super::load_or_fresh_profile(profile)?;
    let mut progress = original.clone();

    if !gate.select_talent(god, tier, key, &mut progress) {
        return Err(if god.talent_tiers().contains(&tier) {
            format!(
                "{tier} for {god} needs {} completed run(s), have {}",
                gate.runs_required(tier),
                progress.runs_with(god)
            )
        } else {
            format!("{god} has no {tier}")
        });
    }

    write_back(profile, original, &ProfileUpdate::talents_from(&progress))?;
    println!("  {} {key} for {god} at {tier}", "Selected".green().bold());
    Ok(())
}

fn find_companion<'c>(catalog: &'c Catalog, id: &str) -> Result<&'c CompanionDefinition, String> {
    catalog
        .companion(id)
        .ok_or_else(|| format!("unknown companion: \"{id}\""))
}

/// Push `update` through the profile store boundary and save the result.
fn write_back(path: &Path, original: PlayerProgress, update: &ProfileUpdate) -> Result<(), String> {
    let mut store = MemoryStore::new(original);
    let saved = store
        .update_me(update)
        .map_err(|e| format!("failed to update profile: {e}"))?;
    super::save_profile(path, &saved)
}
