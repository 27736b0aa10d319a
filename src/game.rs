use alloc::format;
use alloc::string::String;
use core::fmt;

use rand::Rng;

use crate::{
    combat::{resolve_fire, FireOutcome},
    common::{Dimensions, HitState, MatchError},
    grid::Grid,
    placement::{FleetPlacer, ShipDefinition},
};

/// A participant of a match, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Random 128-bit match identifier rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(transparent))]
pub struct MatchId(String);

impl MatchId {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits: u128 = rng.random();
        Self(format!("{:032x}", bits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MatchId> for String {
    fn from(id: MatchId) -> Self {
        id.0
    }
}

/// Lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStatus {
    /// Players registered, playing fields not populated.
    Created,
    InPlay,
    /// A winner has been declared.
    Ended,
}

/// Two-player match: each player's own field holds their ships and is the one
/// the opponent fires at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    id: MatchId,
    player_one: Player,
    player_two: Player,
    player_one_field: Option<Grid>,
    player_two_field: Option<Grid>,
    next_mover: Player,
    winner: Option<Player>,
}

impl Match {
    /// Register two distinct, named players. Player one moves first.
    pub fn new(id: MatchId, player_one: Player, player_two: Player) -> Result<Self, MatchError> {
        if player_one.name.is_empty() || player_two.name.is_empty() {
            return Err(MatchError::EmptyPlayerName);
        }
        if player_one == player_two {
            return Err(MatchError::DuplicatePlayers(player_one.name));
        }
        Ok(Self {
            id,
            next_mover: player_one.clone(),
            player_one,
            player_two,
            player_one_field: None,
            player_two_field: None,
            winner: None,
        })
    }

    /// Populate both playing fields with the same fleet definition.
    ///
    /// Both fields are built before either is stored, so a placement failure
    /// leaves the match in `Created`.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        definitions: &[ShipDefinition],
        dimensions: Dimensions,
        placer: &FleetPlacer,
        rng: &mut R,
    ) -> Result<(), MatchError> {
        if self.winner.is_some() {
            return Err(MatchError::AlreadyEnded);
        }
        let mut one = Grid::new(dimensions)?;
        placer.place(&mut one, definitions, rng)?;
        let mut two = Grid::new(dimensions)?;
        placer.place(&mut two, definitions, rng)?;
        self.player_one_field = Some(one);
        self.player_two_field = Some(two);
        Ok(())
    }

    pub fn id(&self) -> &MatchId {
        &self.id
    }

    pub fn player_one(&self) -> &Player {
        &self.player_one
    }

    pub fn player_two(&self) -> &Player {
        &self.player_two
    }

    /// The player whose turn it is to fire.
    pub fn next_mover(&self) -> &Player {
        &self.next_mover
    }

    pub fn winner(&self) -> Option<&Player> {
        self.winner.as_ref()
    }

    pub fn is_ended(&self) -> bool {
        self.winner.is_some()
    }

    pub fn status(&self) -> MatchStatus {
        if self.winner.is_some() {
            MatchStatus::Ended
        } else if self.player_one_field.is_some() && self.player_two_field.is_some() {
            MatchStatus::InPlay
        } else {
            MatchStatus::Created
        }
    }

    /// The field holding `player`'s own ships.
    pub fn field_of(&self, player: &Player) -> Option<&Grid> {
        if *player == self.player_one {
            self.player_one_field.as_ref()
        } else if *player == self.player_two {
            self.player_two_field.as_ref()
        } else {
            None
        }
    }

    /// The opponent's field, i.e. the one the next mover fires at.
    pub fn playing_field_of_next_mover(&self) -> Result<&Grid, MatchError> {
        let field = if self.next_mover == self.player_one {
            &self.player_two_field
        } else if self.next_mover == self.player_two {
            &self.player_one_field
        } else {
            return Err(MatchError::UnknownMover(self.next_mover.name.clone()));
        };
        field.as_ref().ok_or(MatchError::NotInitialized)
    }

    /// Mutable access to the field the next mover fires at.
    pub fn playing_field_of_next_mover_mut(&mut self) -> Result<&mut Grid, MatchError> {
        let field = if self.next_mover == self.player_one {
            &mut self.player_two_field
        } else if self.next_mover == self.player_two {
            &mut self.player_one_field
        } else {
            return Err(MatchError::UnknownMover(self.next_mover.name.clone()));
        };
        field.as_mut().ok_or(MatchError::NotInitialized)
    }

    /// Pass the turn to the other player.
    pub fn change_next_mover(&mut self) -> Result<(), MatchError> {
        self.next_mover = if self.next_mover == self.player_one {
            self.player_two.clone()
        } else if self.next_mover == self.player_two {
            self.player_one.clone()
        } else {
            return Err(MatchError::UnknownMover(self.next_mover.name.clone()));
        };
        Ok(())
    }

    /// Declare the current mover the winner.
    pub fn end_match(&mut self) {
        self.winner = Some(self.next_mover.clone());
    }

    /// Fire on behalf of the next mover and advance the turn.
    ///
    /// A miss passes the turn, any hit keeps it, and sinking the last ship of
    /// the opponent's fleet ends the match with the shooter as winner.
    pub fn fire(&mut self, x: isize, y: isize) -> Result<FireOutcome, MatchError> {
        if self.winner.is_some() {
            return Err(MatchError::AlreadyEnded);
        }
        let outcome = resolve_fire(self.playing_field_of_next_mover_mut()?, x, y)?;
        match outcome.hit_state {
            HitState::Water => self.change_next_mover()?,
            HitState::Hit => {}
            HitState::WholeShipDestroyed if outcome.fleet_destroyed => self.end_match(),
            HitState::WholeShipDestroyed => {}
        }
        Ok(outcome)
    }

    #[cfg(test)]
    pub(crate) fn set_next_mover(&mut self, player: Player) {
        self.next_mover = player;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn new_match() -> Match {
        let mut rng = SmallRng::seed_from_u64(9);
        Match::new(MatchId::generate(&mut rng), Player::new("ann"), Player::new("bob")).unwrap()
    }

    #[test]
    fn unknown_mover_is_rejected() {
        let mut m = new_match();
        m.set_next_mover(Player::new("eve"));
        assert_eq!(
            m.change_next_mover(),
            Err(MatchError::UnknownMover("eve".into()))
        );
        assert_eq!(
            m.playing_field_of_next_mover().unwrap_err(),
            MatchError::UnknownMover("eve".into())
        );
    }

    #[test]
    fn uninitialized_field_is_rejected() {
        let m = new_match();
        assert_eq!(m.status(), MatchStatus::Created);
        assert_eq!(
            m.playing_field_of_next_mover().unwrap_err(),
            MatchError::NotInitialized
        );
    }
}
