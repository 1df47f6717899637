//! Point-budgeted custom deck construction.

use pantheon_core::GameSettings;
use serde::{Deserialize, Serialize};

/// A card as seen by the deck builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCard {
    /// Card identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// In-game energy cost. May be zero or negative.
    pub cost: i32,
}

impl DeckCard {
    /// Create a card.
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }

    /// Budget points this card consumes. Never less than 1.
    pub fn point_cost(&self) -> u32 {
        point_cost(self.cost)
    }
}

/// Budget points for a card with energy cost `cost`.
pub fn point_cost(cost: i32) -> u32 {
    cost.max(1).unsigned_abs()
}

/// Whether a card of energy cost `cost` fits next to `points_used`.
pub fn can_add_card(cost: i32, points_used: u32, total_points: u32) -> bool {
    points_used.saturating_add(point_cost(cost)) <= total_points
}

/// A deck under construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckBuilder {
    total_points: u32,
    cards: Vec<DeckCard>,
}

impl DeckBuilder {
    /// An empty deck with `total_points` to spend.
    pub fn new(total_points: u32) -> Self {
        Self {
            total_points,
            cards: Vec::new(),
        }
    }

    /// An empty deck with the budget from `settings`.
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self::new(settings.deck_point_budget)
    }

    /// The point budget.
    pub fn total_points(&self) -> u32 {
        self.total_points
    }

    /// Points spent so far.
    pub fn points_used(&self) -> u32 {
        self.cards.iter().map(DeckCard::point_cost).sum()
    }

    /// Points left to spend.
    pub fn points_remaining(&self) -> u32 {
        self.total_points.saturating_sub(self.points_used())
    }

    /// Whether `card` fits in the remaining budget.
    pub fn can_add(&self, card: &DeckCard) -> bool {
        can_add_card(card.cost, self.points_used(), self.total_points)
    }

    /// Add a copy of `card`. Returns false, changing nothing, if it does not fit.
    pub fn add(&mut self, card: DeckCard) -> bool {
        if !self.can_add(&card) {
            log::debug!(
                "refused card '{}': {} points needed, {} left",
                card.id,
                card.point_cost(),
                self.points_remaining()
            );
            return false;
        }
        self.cards.push(card);
        true
    }

    /// Remove one copy of the card with `id`, refunding its points.
    /// Returns false if no such card is in the deck.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.cards.iter().rposition(|c| c.id == id) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }

    /// The cards in insertion order.
    pub fn cards(&self) -> &[DeckCard] {
        &self.cards
    }

    /// Card ids in insertion order, as stored on a run.
    pub fn card_ids(&self) -> Vec<String> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, cost: i32) -> DeckCard {
        DeckCard::new(id, id, cost)
    }

    #[test]
    fn minimum_one_point() {
        assert_eq!(point_cost(0), 1);
        assert_eq!(point_cost(-2), 1);
        assert_eq!(point_cost(1), 1);
        assert_eq!(point_cost(4), 4);
    }

    #[test]
    fn can_add_card_budget() {
        assert!(can_add_card(0, 29, 30));
        assert!(!can_add_card(0, 30, 30));
        assert!(can_add_card(3, 27, 30));
        assert!(!can_add_card(3, 28, 30));
        assert!(!can_add_card(1, u32::MAX, 30));
    }

    #[test]
    fn fill_to_budget_then_refuse() {
        let mut deck = DeckBuilder::new(30);
        for i in 0..10 {
            assert!(deck.add(card(&format!("c{i}"), 3)));
        }
        assert_eq!(deck.points_used(), 30);
        assert_eq!(deck.points_remaining(), 0);
        assert!(!deck.add(card("free", 0)));
        assert!(!deck.add(card("one", 1)));
        assert_eq!(deck.len(), 10);
    }

    #[test]
    fn zero_cost_consumes_a_point() {
        let mut deck = DeckBuilder::new(30);
        assert!(deck.add(card("zap", 0)));
        assert_eq!(deck.points_used(), 1);
    }

    #[test]
    fn remove_refunds() {
        let mut deck = DeckBuilder::new(10);
        assert!(deck.add(card("big", 6)));
        assert!(deck.add(card("small", 2)));
        assert!(!deck.add(card("big", 6)));
        assert!(deck.remove("big"));
        assert_eq!(deck.points_used(), 2);
        assert!(deck.add(card("big", 6)));
    }

    #[test]
    fn remove_missing_is_refused() {
        let mut deck = DeckBuilder::new(10);
        assert!(!deck.remove("ghost"));
        deck.add(card("a", 1));
        assert!(!deck.remove("b"));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn copies_are_allowed() {
        let mut deck = DeckBuilder::new(10);
        assert!(deck.add(card("strike", 2)));
        assert!(deck.add(card("strike", 2)));
        assert_eq!(deck.card_ids(), ["strike", "strike"]);
        assert!(deck.remove("strike"));
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn budget_from_settings() {
        let deck = DeckBuilder::from_settings(&GameSettings::default());
        assert_eq!(deck.total_points(), 30);
        assert!(deck.is_empty());
    }
}
