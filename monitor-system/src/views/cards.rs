//! User-created cards, kept only on this device

use std::fmt::Display;

use local_store::{
    CARDS_KEY,
    json::{load_json, save_json},
    traits::KeyValueStore,
};
use serde::{Deserialize, Serialize};
use utils::time::Time;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u64,
    pub title: String,
    pub description: String,
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}: {}", self.id, self.title, self.description)
    }
}

#[must_use]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardList {
    cards: Vec<Card>,
}

impl CardList {
    /// A missing or unreadable stored list starts empty
    pub async fn load(store: &dyn KeyValueStore) -> Self {
        match load_json::<Vec<Card>>(store, CARDS_KEY).await {
            Ok(cards) => Self {
                cards: cards.unwrap_or_default(),
            },
            Err(e) => {
                tracing::error!("Failed to load cards: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The new card's id is `now` in milliseconds, moved forward if already taken
    pub async fn add(
        &mut self,
        store: &dyn KeyValueStore,
        title: impl Into<String>,
        description: impl Into<String>,
        now: Time,
    ) -> &Card {
        let mut id = u64::try_from(now.as_millis_since_epoch()).unwrap_or(u64::MAX);
        while self.cards.iter().any(|c| c.id == id) {
            id = id.wrapping_add(1);
        }

        self.cards.push(Card {
            id,
            title: title.into(),
            description: description.into(),
        });
        self.persist(store).await;

        let last = self.cards.len() - 1;
        &self.cards[last]
    }

    /// Returns whether a card was removed
    pub async fn delete(&mut self, store: &dyn KeyValueStore, id: u64) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.id != id);
        if self.cards.len() == before {
            return false;
        }

        self.persist(store).await;
        true
    }

    async fn persist(&self, store: &dyn KeyValueStore) {
        if let Err(e) = save_json(store, CARDS_KEY, &self.cards).await {
            tracing::error!("Failed to save cards: {e}");
        }
    }
}

impl Display for CardList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cards.is_empty() {
            return writeln!(f, "No cards yet.");
        }
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}
