use alloc::vec::Vec;

use crate::common::{Dimensions, ShapeError};
use crate::placement::ShipDefinition;

/// Grid size used when none is requested.
pub const DEFAULT_DIMENSIONS: Dimensions = Dimensions::new(10, 10);
/// Smallest accepted grid size per axis.
pub const MIN_AXIS: usize = 10;
/// Largest accepted grid size per axis.
pub const MAX_AXIS: usize = 20;
/// Full fleet layouts tried before giving up.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 5;

/// Standard fleet: type label and length of each straight ship.
pub const STANDARD_FLEET: [(&str, usize); 5] = [
    ("Carrier", 5),
    ("Battleship", 4),
    ("Cruiser", 3),
    ("Submarine", 3),
    ("Destroyer", 2),
];

/// Ship definitions for [`STANDARD_FLEET`].
pub fn standard_fleet() -> Result<Vec<ShipDefinition>, ShapeError> {
    STANDARD_FLEET
        .iter()
        .map(|&(name, len)| ShipDefinition::line(name, len))
        .collect()
}

#[cfg(feature = "std")]
pub use self::settings::Settings;

#[cfg(feature = "std")]
mod settings {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::Context;
    use serde::{Deserialize, Serialize};

    use super::{MAX_AXIS, MAX_PLACEMENT_ATTEMPTS, MIN_AXIS};
    use crate::common::Dimensions;

    /// Runtime settings, loadable from a JSON file. Missing fields take the
    /// compile-time defaults.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(default, rename_all = "camelCase")]
    pub struct Settings {
        pub min_axis: usize,
        pub max_axis: usize,
        pub placement_attempts: usize,
        /// Ship definition file; the standard fleet is used when absent.
        pub ships_file: Option<PathBuf>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                min_axis: MIN_AXIS,
                max_axis: MAX_AXIS,
                placement_attempts: MAX_PLACEMENT_ATTEMPTS,
                ships_file: None,
            }
        }
    }

    impl Settings {
        /// Read settings from a JSON file.
        pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
            let path = path.as_ref();
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading settings file {}", path.display()))?;
            Self::from_json(&text)
                .with_context(|| format!("parsing settings file {}", path.display()))
        }

        pub fn from_json(text: &str) -> serde_json::Result<Self> {
            serde_json::from_str(text)
        }

        /// Returns `true` if both axes lie within `min_axis..=max_axis`.
        pub fn accepts(&self, dimensions: Dimensions) -> bool {
            let range = self.min_axis..=self.max_axis;
            range.contains(&dimensions.x) && range.contains(&dimensions.y)
        }
    }
}
