//! The boundary to the external profile and run stores.
//!
//! The engine never persists anything on its own. It reads a profile snapshot
//! through [`ProfileStore`], writes partial updates back with
//! [`ProfileUpdate`], and hands run records to a [`RunStore`].
//! [`MemoryStore`] implements both for tests and local tooling.

use std::collections::{BTreeMap, BTreeSet};

use pantheon_core::{God, PlayerProgress, RunId, RunRecord, RunStatus};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Read and write access to the current player's profile.
pub trait ProfileStore {
    /// Fetch the current player's progress.
    fn me(&self) -> StoreResult<PlayerProgress>;

    /// Apply a partial update and return the stored result.
    fn update_me(&mut self, update: &ProfileUpdate) -> StoreResult<PlayerProgress>;
}

/// Create, update, and list run records.
pub trait RunStore {
    /// Persist a new run and return it as stored.
    fn create_run(&mut self, run: RunRecord) -> StoreResult<RunRecord>;

    /// Overwrite an existing run.
    fn update_run(&mut self, run: &RunRecord) -> StoreResult<()>;

    /// Fetch a run by id.
    fn get_run(&self, id: RunId) -> StoreResult<RunRecord>;

    /// List runs, optionally only those with `status`.
    fn list_runs(&self, status: Option<RunStatus>) -> StoreResult<Vec<RunRecord>>;
}

/// A partial profile update. Only the `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New total victory count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_victories: Option<u32>,
    /// New life count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lives: Option<u32>,
    /// New favor token balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favor_tokens: Option<u32>,
    /// New essence crystal balance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub essence_crystals: Option<u32>,
    /// Full set of owned companions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlocked_companions: Option<BTreeSet<String>>,
    /// Equipped companions in slot order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipped_companions: Option<Vec<String>>,
    /// New highest completed rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highest_rank_completed: Option<i32>,
    /// Full map of completed runs per god.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub god_runs_completed: Option<BTreeMap<God, u32>>,
    /// Tier 1 talent picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub god_talents_tier1: Option<BTreeMap<God, String>>,
    /// Tier 2 talent picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub god_talents_tier2: Option<BTreeMap<God, String>>,
    /// Tier 3 talent picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub god_talents_tier3: Option<BTreeMap<God, String>>,
    /// Tier 4 talent picks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub god_talents_tier4: Option<BTreeMap<God, String>>,
}

impl ProfileUpdate {
    /// Whether the update writes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write every `Some` field onto `progress`.
    pub fn apply_to(&self, progress: &mut PlayerProgress) {
        if let Some(v) = self.total_victories {
            progress.total_victories = v;
        }
        if let Some(v) = self.lives {
            progress.lives = v;
        }
        if let Some(v) = self.favor_tokens {
            progress.favor_tokens = v;
        }
        if let Some(v) = self.essence_crystals {
            progress.essence_crystals = v;
        }
        if let Some(v) = &self.unlocked_companions {
            progress.unlocked_companions = v.clone();
        }
        if let Some(v) = &self.equipped_companions {
            progress.equipped_companions = v.clone();
        }
        if let Some(v) = self.highest_rank_completed {
            progress.highest_rank_completed = v;
        }
        if let Some(v) = &self.god_runs_completed {
            progress.god_runs_completed = v.clone();
        }
        if let Some(v) = &self.god_talents_tier1 {
            progress.talents.tier1 = v.clone();
        }
        if let Some(v) = &self.god_talents_tier2 {
            progress.talents.tier2 = v.clone();
        }
        if let Some(v) = &self.god_talents_tier3 {
            progress.talents.tier3 = v.clone();
        }
        if let Some(v) = &self.god_talents_tier4 {
            progress.talents.tier4 = v.clone();
        }
    }

    /// An update that writes back companion ownership, equipment, and favor
    /// from `progress`, as after a purchase or equip change.
    pub fn companions_from(progress: &PlayerProgress) -> Self {
        Self {
            favor_tokens: Some(progress.favor_tokens),
            unlocked_companions: Some(progress.unlocked_companions.clone()),
            equipped_companions: Some(progress.equipped_companions.clone()),
            ..Self::default()
        }
    }

    /// An update that writes back all four talent tiers from `progress`.
    pub fn talents_from(progress: &PlayerProgress) -> Self {
        Self {
            god_talents_tier1: Some(progress.talents.tier1.clone()),
            god_talents_tier2: Some(progress.talents.tier2.clone()),
            god_talents_tier3: Some(progress.talents.tier3.clone()),
            god_talents_tier4: Some(progress.talents.tier4.clone()),
            ..Self::default()
        }
    }
}

/// In-memory profile and run store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    profile: PlayerProgress,
    runs: Vec<RunRecord>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    /// A store holding `profile` and no runs.
    pub fn new(profile: PlayerProgress) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Make every read fail with [`StoreError::Unavailable`].
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every write fail with [`StoreError::Unavailable`].
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// The stored profile.
    pub fn profile(&self) -> &PlayerProgress {
        &self.profile
    }

    /// All stored runs in creation order.
    pub fn runs(&self) -> &[RunRecord] {
        &self.runs
    }

    fn check_read(&self) -> StoreResult<()> {
        if self.fail_reads {
            Err(StoreError::Unavailable("reads disabled".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> StoreResult<()> {
        if self.fail_writes {
            Err(StoreError::Unavailable("writes disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl ProfileStore for MemoryStore {
    fn me(&self) -> StoreResult<PlayerProgress> {
        self.check_read()?;
        Ok(self.profile.clone())
    }

    fn update_me(&mut self, update: &ProfileUpdate) -> StoreResult<PlayerProgress> {
        self.check_write()?;
        update.apply_to(&mut self.profile);
        Ok(self.profile.clone())
    }
}

impl RunStore for MemoryStore {
    fn create_run(&mut self, run: RunRecord) -> StoreResult<RunRecord> {
        self.check_write()?;
        self.runs.push(run.clone());
        Ok(run)
    }

    fn update_run(&mut self, run: &RunRecord) -> StoreResult<()> {
        self.check_write()?;
        let slot = self
            .runs
            .iter_mut()
            .find(|r| r.id == run.id)
            .ok_or_else(|| StoreError::NotFound(format!("run {}", run.id)))?;
        *slot = run.clone();
        Ok(())
    }

    fn get_run(&self, id: RunId) -> StoreResult<RunRecord> {
        self.check_read()?;
        self.runs
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("run {id}")))
    }

    fn list_runs(&self, status: Option<RunStatus>) -> StoreResult<Vec<RunRecord>> {
        self.check_read()?;
        Ok(self
            .runs
            .iter()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantheon_core::TalentTier;

    #[test]
    fn empty_update() {
        let update = ProfileUpdate::default();
        assert!(update.is_empty());
        let mut p = PlayerProgress::default();
        let before = p.clone();
        update.apply_to(&mut p);
        assert_eq!(p, before);
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn partial_update_only_touches_some_fields() {
        let mut p = PlayerProgress {
            favor_tokens: 10,
            lives: 2,
            ..PlayerProgress::default()
        };
        let update = ProfileUpdate {
            favor_tokens: Some(60),
            highest_rank_completed: Some(3),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
        update.apply_to(&mut p);
        assert_eq!(p.favor_tokens, 60);
        assert_eq!(p.highest_rank_completed, 3);
        assert_eq!(p.lives, 2);
    }

    #[test]
    fn serializes_only_set_fields() {
        let update = ProfileUpdate {
            lives: Some(1),
            god_runs_completed: Some(BTreeMap::from([(God::Ares, 2)])),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(json["lives"], 1);
        assert_eq!(json["god_runs_completed"]["Ares"], 2);
    }

    #[test]
    fn companion_and_talent_writebacks() {
        let mut p = PlayerProgress::default();
        p.unlocked_companions.insert("owl".to_string());
        p.equipped_companions.push("owl".to_string());
        p.favor_tokens = 7;
        p.talents.set(God::Hera, TalentTier::One, "vow");

        let mut stored = PlayerProgress::default();
        ProfileUpdate::companions_from(&p).apply_to(&mut stored);
        ProfileUpdate::talents_from(&p).apply_to(&mut stored);
        assert_eq!(stored, p);
    }

    #[test]
    fn memory_store_profile_round_trip() {
        let mut store = MemoryStore::new(PlayerProgress::default());
        let updated = store
            .update_me(&ProfileUpdate {
                total_victories: Some(4),
                ..ProfileUpdate::default()
            })
            .unwrap();
        assert_eq!(updated.total_victories, 4);
        assert_eq!(store.me().unwrap().total_victories, 4);
    }

    #[test]
    fn memory_store_runs() {
        let mut store = MemoryStore::default();
        let run = store
            .create_run(RunRecord::new(God::Zeus, 1, Vec::new()))
            .unwrap();
        assert_eq!(store.get_run(run.id).unwrap(), run);

        let mut done = run.clone();
        done.set_status(RunStatus::Victory);
        store.update_run(&done).unwrap();
        assert_eq!(store.list_runs(Some(RunStatus::Victory)).unwrap().len(), 1);
        assert!(store.list_runs(Some(RunStatus::InProgress)).unwrap().is_empty());
        assert_eq!(store.list_runs(None).unwrap().len(), 1);
    }

    #[test]
    fn memory_store_missing_run() {
        let mut store = MemoryStore::default();
        let ghost = RunRecord::new(God::Zeus, 1, Vec::new());
        assert!(matches!(store.get_run(ghost.id), Err(StoreError::NotFound(_))));
        assert!(matches!(store.update_run(&ghost), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn memory_store_failure_switches() {
        let mut store = MemoryStore::default();
        store.set_fail_writes(true);
        assert!(matches!(
            store.update_me(&ProfileUpdate::default()),
            Err(StoreError::Unavailable(_))
        ));
        assert!(
            store
                .create_run(RunRecord::new(God::Zeus, 0, Vec::new()))
                .is_err()
        );
        assert!(store.me().is_ok());

        store.set_fail_writes(false);
        store.set_fail_reads(true);
        assert!(store.me().is_err());
        assert!(store.list_runs(None).is_err());
    }
}
