#![cfg_attr(not(feature = "std"), no_std)]
//! Playing-field engine for two-player naval combat matches: polyomino ship
//! shapes, random fleet placement, shot resolution and turn handling.
//!
//! The geometric core (shapes, grids, placement, combat, matches) only needs
//! `alloc`. Stores, the match service, settings files and logging require the
//! `std` feature.

extern crate alloc;

mod combat;
mod common;
mod config;
pub mod definitions;
mod game;
mod grid;
#[cfg(feature = "std")]
mod logging;
mod placement;
#[cfg(feature = "std")]
pub mod service;
mod shape;
#[cfg(feature = "std")]
pub mod store;

pub use combat::*;
pub use common::*;
pub use config::*;
pub use definitions::{parse_definitions, ShipDefinitionSource, StandardFleet, TextDefinitions};
#[cfg(feature = "std")]
pub use definitions::DefinitionsFile;
pub use game::*;
pub use grid::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, init_logging_with, parse_level, LOG_ENV};
pub use placement::*;
#[cfg(feature = "std")]
pub use service::*;
pub use shape::*;
#[cfg(feature = "std")]
pub use store::*;
