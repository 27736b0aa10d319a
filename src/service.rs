#![cfg(feature = "std")]
//! Match orchestration: creating matches, firing, and looking them up.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    common::{DefinitionError, Dimensions, HitState, MatchError, StoreError},
    config::Settings,
    definitions::{DefinitionsFile, ShipDefinitionSource, StandardFleet},
    game::{Match, MatchId, Player},
    placement::{FleetPlacer, ShipDefinition},
    store::{InMemoryMatchStore, MatchStore},
};

/// Errors returned by [`BattleshipsService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested grid size lies outside the configured range.
    #[error("playing field dimensions {x}x{y} are outside of the allowed range {min}..={max}")]
    InvalidDimensions {
        x: usize,
        y: usize,
        min: usize,
        max: usize,
    },
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Definitions(#[from] DefinitionError),
}

/// Request to start a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMatchInput {
    pub player_one: Player,
    pub player_two: Player,
    pub dimensions: Dimensions,
}

/// Request to fire on behalf of a match's next mover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireInput {
    pub match_id: String,
    pub x: isize,
    pub y: isize,
}

/// Result of a fire request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FireOutput {
    pub match_id: String,
    pub hit_state: HitState,
    /// Set when this shot decided the match; mirrors `winner.is_some()`.
    pub game_ended: bool,
    pub winner: Option<Player>,
}

/// Runs matches against a [`MatchStore`].
///
/// Calls take `&mut self`; callers sharing a service across threads must
/// serialize access themselves.
pub struct BattleshipsService<S: MatchStore = InMemoryMatchStore> {
    settings: Settings,
    definitions: Vec<ShipDefinition>,
    placer: FleetPlacer,
    store: S,
    rng: SmallRng,
}

impl BattleshipsService<InMemoryMatchStore> {
    /// Service with an in-memory store, loading ships as configured in
    /// `settings` and seeding its generator from the OS.
    pub fn from_settings(settings: Settings) -> Result<Self, ServiceError> {
        let definitions = match &settings.ships_file {
            Some(path) => DefinitionsFile::new(path).load()?,
            None => StandardFleet.load()?,
        };
        let mut seed_rng = rand::rng();
        let rng = SmallRng::from_rng(&mut seed_rng);
        Ok(Self::new(settings, definitions, InMemoryMatchStore::new(), rng))
    }
}

impl<S: MatchStore> BattleshipsService<S> {
    pub fn new(settings: Settings, definitions: Vec<ShipDefinition>, store: S, rng: SmallRng) -> Self {
        let placer = FleetPlacer::new(settings.placement_attempts);
        Self {
            settings,
            definitions,
            placer,
            store,
            rng,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn definitions(&self) -> &[ShipDefinition] {
        &self.definitions
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a match, populate both playing fields and store it as active.
    pub fn create_match(&mut self, input: CreateMatchInput) -> Result<MatchId, ServiceError> {
        log::debug!(
            "create_match started: dimensions={}, player_one={}, player_two={}",
            input.dimensions,
            input.player_one,
            input.player_two
        );
        let result = self.try_create_match(input);
        match &result {
            Ok(id) => log::debug!("create_match ended with match {} created", id),
            Err(e) => log::error!("create_match ended with error: {}", e),
        }
        result
    }

    fn try_create_match(&mut self, input: CreateMatchInput) -> Result<MatchId, ServiceError> {
        let d = input.dimensions;
        if !self.settings.accepts(d) {
            return Err(ServiceError::InvalidDimensions {
                x: d.x,
                y: d.y,
                min: self.settings.min_axis,
                max: self.settings.max_axis,
            });
        }
        let id = MatchId::generate(&mut self.rng);
        let mut game = Match::new(id.clone(), input.player_one, input.player_two)?;
        log::trace!("initialization of match {} started", id);
        game.initialize(&self.definitions, d, &self.placer, &mut self.rng)?;
        log::trace!("initialization of match {} finished", id);
        self.store.put_active(game)?;
        Ok(id)
    }

    /// Fire on behalf of the next mover of an active match. A match that ends
    /// with this shot is moved to the ended matches.
    pub fn fire(&mut self, input: FireInput) -> Result<FireOutput, ServiceError> {
        log::debug!(
            "fire started: match_id={}, x={}, y={}",
            input.match_id,
            input.x,
            input.y
        );
        let result = self.try_fire(&input);
        match &result {
            Ok(out) => log::debug!(
                "fire ended: match_id={}, hit_state={}, game_ended={}, winner={:?}",
                out.match_id,
                out.hit_state,
                out.game_ended,
                out.winner.as_ref().map(Player::name)
            ),
            Err(e) => log::error!("fire ended with error: {}", e),
        }
        result
    }

    fn try_fire(&mut self, input: &FireInput) -> Result<FireOutput, ServiceError> {
        let game = self.store.get_active_mut(&input.match_id)?;
        log::debug!(
            "player '{}' firing at ({}, {})",
            game.next_mover(),
            input.x,
            input.y
        );
        let outcome = game.fire(input.x, input.y)?;
        let winner = game.winner().cloned();
        if winner.is_some() {
            self.store.end_active(&input.match_id)?;
        }
        Ok(FireOutput {
            match_id: input.match_id.clone(),
            hit_state: outcome.hit_state,
            game_ended: winner.is_some(),
            winner,
        })
    }

    pub fn active_match(&self, id: &str) -> Result<&Match, ServiceError> {
        log::debug!("active_match: id={}", id);
        self.store.get_active(id).map_err(|e| {
            log::error!("active_match ended with error: {}", e);
            e.into()
        })
    }

    pub fn ended_match(&self, id: &str) -> Result<&Match, ServiceError> {
        log::debug!("ended_match: id={}", id);
        self.store.get_ended(id).map_err(|e| {
            log::error!("ended_match ended with error: {}", e);
            e.into()
        })
    }
}
