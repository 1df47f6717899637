//! Run creation and completion against the external stores.
//!
//! `RunFlow` is the only piece of the engine that talks to a store. Starting a
//! run checks the same gates the UI shows, retires stale in-progress runs,
//! draws modifiers, and creates the run record. Completing a run grants the
//! rank reward through [`RankResolver::reward_for_rank`], the same function
//! that produced the preview when the run was started.

use pantheon_core::{Catalog, God, PlayerProgress, Reward, RunId, RunRecord, RunStatus};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::deck::{DeckBuilder, DeckCard};
use crate::error::{FlowError, FlowResult, StoreError};
use crate::modifiers::ModifierSelector;
use crate::rank::{RankProgress, RankResolver};
use crate::store::{ProfileStore, ProfileUpdate, RunStore};
use crate::unlock::UnlockGate;

/// What the player asked to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// The god to play.
    pub god: God,
    /// The divine rank to play at.
    pub rank: u8,
    /// A custom deck, or `None` for the god's starter deck.
    pub custom_deck: Option<Vec<DeckCard>>,
}

impl RunRequest {
    /// A request with the starter deck.
    pub fn new(god: God, rank: u8) -> Self {
        Self {
            god,
            rank,
            custom_deck: None,
        }
    }

    /// Use a custom deck.
    pub fn with_deck(mut self, cards: Vec<DeckCard>) -> Self {
        self.custom_deck = Some(cards);
        self
    }
}

/// Why a run was not started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Refusal {
    /// The requested rank is above the player's current rank.
    RankLocked {
        /// Rank that was asked for.
        requested: u8,
        /// Highest rank the player may select.
        current: u8,
    },
    /// The player has no lives left.
    NoLives,
    /// The custom deck does not fit the point budget.
    DeckOverBudget {
        /// Points the full deck would need.
        points_needed: u32,
        /// Configured budget.
        budget: u32,
    },
}

impl std::fmt::Display for Refusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RankLocked { requested, current } => {
                write!(f, "rank {requested} is locked (current rank {current})")
            }
            Self::NoLives => write!(f, "no lives left"),
            Self::DeckOverBudget {
                points_needed,
                budget,
            } => write!(f, "deck needs {points_needed} points, budget is {budget}"),
        }
    }
}

/// A freshly created run and what winning it would pay.
#[derive(Debug, Clone, PartialEq)]
pub struct RunPreview {
    /// The run as stored.
    pub run: RunRecord,
    /// Reward granted on victory.
    pub reward: Reward,
}

/// Outcome of [`RunFlow::start_run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunStart {
    /// The run was created.
    Started(RunPreview),
    /// The request was refused; nothing was written.
    Refused(Refusal),
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// The player won.
    Victory,
    /// The player lost.
    Defeat,
}

/// What changed when a run ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The finished run.
    pub run_id: RunId,
    /// How it ended.
    pub outcome: RunOutcome,
    /// Currency granted. Zero on defeat.
    pub reward: Reward,
    /// Current rank before the run was counted.
    pub rank_before: u8,
    /// Current rank after.
    pub rank_after: u8,
    /// Progress toward the next rank after.
    pub progress: RankProgress,
    /// Lives left after.
    pub lives: u32,
}

impl RunSummary {
    /// Whether this run unlocked a new rank.
    pub fn rank_unlocked(&self) -> bool {
        self.rank_after > self.rank_before
    }
}

/// Drives run creation and completion through a store.
pub struct RunFlow<'a, S> {
    catalog: &'a Catalog,
    store: &'a mut S,
    resolver: RankResolver<'a>,
    gate: UnlockGate<'a>,
    selector: ModifierSelector<'a>,
}

impl<'a, S: ProfileStore + RunStore> RunFlow<'a, S> {
    /// Create a flow over `catalog` and `store`.
    pub fn new(catalog: &'a Catalog, store: &'a mut S) -> Self {
        let resolver = RankResolver::new(&catalog.ranks);
        Self {
            catalog,
            store,
            resolver,
            gate: UnlockGate::new(resolver, &catalog.settings),
            selector: ModifierSelector::new(resolver, &catalog.settings),
        }
    }

    /// The rank resolver in use.
    pub fn resolver(&self) -> RankResolver<'a> {
        self.resolver
    }

    /// Fetch the current profile.
    pub fn profile(&self) -> FlowResult<PlayerProgress> {
        self.store.me().map_err(|e| {
            log::error!("profile load failed: {e}");
            FlowError::Load(e)
        })
    }

    /// Start a run.
    ///
    /// Gated requests come back as [`RunStart::Refused`] without touching the
    /// store. A store failure aborts with an error; the caller should tell the
    /// player the run could not be created.
    pub fn start_run<R: Rng + ?Sized>(
        &mut self,
        request: RunRequest,
        rng: &mut R,
    ) -> FlowResult<RunStart> {
        let profile = self.profile()?;

        if !self
            .gate
            .can_select_rank(request.rank, profile.total_victories)
        {
            let refusal = Refusal::RankLocked {
                requested: request.rank,
                current: self.resolver.current_rank(profile.total_victories),
            };
            log::debug!("run refused: {refusal}");
            return Ok(RunStart::Refused(refusal));
        }
        if profile.lives == 0 {
            log::debug!("run refused: {}", Refusal::NoLives);
            return Ok(RunStart::Refused(Refusal::NoLives));
        }

        let (deck, custom_deck) = match request.custom_deck {
            Some(cards) => match self.build_deck(cards) {
                Ok(deck) => (deck.card_ids(), true),
                Err(refusal) => {
                    log::debug!("run refused: {refusal}");
                    return Ok(RunStart::Refused(refusal));
                }
            },
            None => (Vec::new(), false),
        };

        self.abandon_stale_runs()?;

        let modifiers = self
            .selector
            .select(request.rank, &self.catalog.modifiers, rng);
        let record = RunRecord::new(request.god, request.rank, modifiers.into_vec())
            .with_deck(deck, custom_deck);
        let run = self.store.create_run(record).map_err(persist_failed)?;

        log::info!(
            "started run {} as {} at rank {} with {} modifier(s)",
            run.id,
            run.god,
            run.divine_rank,
            run.active_modifiers.len()
        );
        Ok(RunStart::Started(RunPreview {
            reward: self.resolver.reward_for_rank(run.divine_rank),
            run,
        }))
    }

    /// Finish an in-progress run and apply its consequences to the profile.
    pub fn complete_run(&mut self, id: RunId, outcome: RunOutcome) -> FlowResult<RunSummary> {
        let mut run = self.store.get_run(id).map_err(|e| match e {
            StoreError::NotFound(_) => FlowError::RunNotFound(id),
            other => {
                log::error!("run load failed: {other}");
                FlowError::Load(other)
            }
        })?;
        if !run.is_in_progress() {
            return Err(FlowError::RunNotInProgress {
                id,
                status: run.status,
            });
        }

        let profile = self.profile()?;
        let rank_before = self.resolver.current_rank(profile.total_victories);

        let (update, reward, status) = match outcome {
            RunOutcome::Victory => {
                let reward = self.resolver.reward_for_rank(run.divine_rank);
                let mut god_runs = profile.god_runs_completed.clone();
                *god_runs.entry(run.god).or_insert(0) += 1;
                let update = ProfileUpdate {
                    total_victories: Some(profile.total_victories.saturating_add(1)),
                    favor_tokens: Some(profile.favor_tokens.saturating_add(reward.favor_tokens)),
                    essence_crystals: Some(
                        profile
                            .essence_crystals
                            .saturating_add(reward.essence_crystals),
                    ),
                    highest_rank_completed: Some(
                        profile
                            .highest_rank_completed
                            .max(i32::from(run.divine_rank)),
                    ),
                    god_runs_completed: Some(god_runs),
                    ..ProfileUpdate::default()
                };
                (update, reward, RunStatus::Victory)
            }
            RunOutcome::Defeat => {
                let update = ProfileUpdate {
                    lives: Some(profile.lives.saturating_sub(1)),
                    ..ProfileUpdate::default()
                };
                (update, Reward::default(), RunStatus::Defeat)
            }
        };

        run.set_status(status);
        self.store.update_run(&run).map_err(persist_failed)?;
        let updated = match self.store.update_me(&update) {
            Ok(updated) => updated,
            Err(e) => {
                self.reopen(&mut run);
                return Err(persist_failed(e));
            }
        };

        let summary = RunSummary {
            run_id: id,
            outcome,
            reward,
            rank_before,
            rank_after: self.resolver.current_rank(updated.total_victories),
            progress: self.resolver.progress_to_next(updated.total_victories),
            lives: updated.lives,
        };
        log::info!(
            "run {id} ended in {status}: +{} favor, +{} essence, rank {} -> {}",
            reward.favor_tokens,
            reward.essence_crystals,
            summary.rank_before,
            summary.rank_after
        );
        Ok(summary)
    }

    /// Put a run closed by a failed completion back in progress so the
    /// completion can be retried.
    fn reopen(&mut self, run: &mut RunRecord) {
        run.set_status(RunStatus::InProgress);
        if let Err(e) = self.store.update_run(run) {
            log::error!("could not reopen run {} after failed profile write: {e}", run.id);
        }
    }

    fn build_deck(&self, cards: Vec<DeckCard>) -> Result<DeckBuilder, Refusal> {
        let mut deck = DeckBuilder::from_settings(&self.catalog.settings);
        let points_needed: u32 = cards.iter().map(DeckCard::point_cost).sum();
        for card in cards {
            if !deck.add(card) {
                return Err(Refusal::DeckOverBudget {
                    points_needed,
                    budget: deck.total_points(),
                });
            }
        }
        Ok(deck)
    }

    fn abandon_stale_runs(&mut self) -> FlowResult<()> {
        let stale = self
            .store
            .list_runs(Some(RunStatus::InProgress))
            .map_err(|e| {
                log::error!("run listing failed: {e}");
                FlowError::Load(e)
            })?;
        for mut run in stale {
            run.set_status(RunStatus::Abandoned);
            self.store.update_run(&run).map_err(persist_failed)?;
            log::info!("abandoned stale run {}", run.id);
        }
        Ok(())
    }
}

fn persist_failed(e: StoreError) -> FlowError {
    log::error!("save failed: {e}");
    FlowError::Persist(e)
}
