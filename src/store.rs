#![cfg(feature = "std")]

use std::collections::HashMap;

use crate::common::StoreError;
use crate::game::Match;

/// Keyed storage for active and ended matches.
///
/// Unknown identifiers always surface as [`StoreError::NotFound`].
pub trait MatchStore {
    fn get_active(&self, id: &str) -> Result<&Match, StoreError>;

    fn get_active_mut(&mut self, id: &str) -> Result<&mut Match, StoreError>;

    /// Store a new active match under its own identifier.
    fn put_active(&mut self, game: Match) -> Result<(), StoreError>;

    /// Move an active match to the ended partition.
    fn end_active(&mut self, id: &str) -> Result<(), StoreError>;

    fn get_ended(&self, id: &str) -> Result<&Match, StoreError>;
}

/// [`MatchStore`] backed by two hash maps.
#[derive(Debug, Default)]
pub struct InMemoryMatchStore {
    active: HashMap<String, Match>,
    ended: HashMap<String, Match>,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn ended_count(&self) -> usize {
        self.ended.len()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn get_active(&self, id: &str) -> Result<&Match, StoreError> {
        self.active
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_active_mut(&mut self, id: &str) -> Result<&mut Match, StoreError> {
        self.active
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn put_active(&mut self, game: Match) -> Result<(), StoreError> {
        let id = game.id().to_string();
        if self.active.contains_key(&id) || self.ended.contains_key(&id) {
            return Err(StoreError::DuplicateId(id));
        }
        log::trace!("storing active match {}", id);
        self.active.insert(id, game);
        Ok(())
    }

    fn end_active(&mut self, id: &str) -> Result<(), StoreError> {
        let game = self
            .active
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        log::trace!("match {} moved to ended matches", id);
        self.ended.insert(id.to_string(), game);
        Ok(())
    }

    fn get_ended(&self, id: &str) -> Result<&Match, StoreError> {
        self.ended
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
