//! Deck construction and dealing.
//!
//! The simulator never reuses a deck across iterations: every deal
//! starts from a fresh remaining deck (52 cards minus whatever is
//! already assigned), shuffles it, and deals off the top.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use super::card::Card;

/// The undealt portion of a 52-card deck.
///
/// Construction excludes any dead cards; enumeration order of the
/// remainder is stable (card id order) until the deck is shuffled.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Create a full deck of 52 cards.
    pub fn new() -> Self {
        Self::without(&[])
    }

    /// Create a deck with the given dead cards removed.
    ///
    /// If `dead` lists all 52 cards, the deck is empty. Duplicates in
    /// `dead` are harmless here; each physical card appears at most once
    /// in the deck regardless.
    pub fn without(dead: &[Card]) -> Self {
        let mut dead_mask = 0u64;
        for card in dead {
            dead_mask |= 1u64 << card.id();
        }

        let cards = (0..52u8)
            .map(Card::from_id)
            .filter(|c| dead_mask & (1u64 << c.id()) == 0)
            .collect();

        Self { cards, next: 0 }
    }

    /// Shuffle the undealt cards (Fisher-Yates via `SliceRandom`).
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Deal the next card, or `None` if the deck is exhausted.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    /// Number of undealt cards.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// The undealt cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[self.next..]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_full_deck() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), 52);

        let unique: HashSet<Card> = deck.remaining_cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_dealing() {
        let mut deck = Deck::new();
        let first = deck.deal().unwrap();
        assert_eq!(deck.remaining(), 51);
        assert!(!deck.remaining_cards().contains(&first));

        for _ in 0..51 {
            assert!(deck.deal().is_some());
        }
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal().is_none());
    }

    #[test]
    fn test_without_excludes_dead_cards() {
        let dead = vec![
            Card::from_str("As").unwrap(),
            Card::from_str("Ah").unwrap(),
            Card::from_str("2c").unwrap(),
        ];
        let deck = Deck::without(&dead);
        assert_eq!(deck.remaining(), 49);
        for card in &dead {
            assert!(!deck.remaining_cards().contains(card));
        }
    }

    #[test]
    fn test_without_everything_is_empty() {
        let all: Vec<Card> = (0..52u8).map(Card::from_id).collect();
        let mut deck = Deck::without(&all);
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal().is_none());
    }

    #[test]
    fn test_enumeration_order_is_stable() {
        let a = Deck::without(&[Card::from_str("5d").unwrap()]);
        let b = Deck::without(&[Card::from_str("5d").unwrap()]);
        assert_eq!(a.remaining_cards(), b.remaining_cards());
    }

    #[test]
    fn test_shuffle_preserves_card_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let dead = vec![Card::from_str("As").unwrap()];
        let mut deck = Deck::without(&dead);
        let before: HashSet<Card> = deck.remaining_cards().iter().copied().collect();

        deck.shuffle(&mut rng);
        let after: HashSet<Card> = deck.remaining_cards().iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(deck.remaining(), 51);
    }
}
