//! Sources of ship definitions.
//!
//! The text format lists one ship per block, blocks separated by blank lines.
//! The first line of a block is the ship's type label; the remaining lines are
//! mask rows where `X` or `x` marks an occupied cell:
//!
//! ```text
//! Carrier
//! XXXXX
//!
//! Tetris
//! XXX
//! .X.
//! ```

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::common::DefinitionError;
use crate::config::standard_fleet;
use crate::placement::ShipDefinition;
use crate::shape::Shape;

/// Anything that can supply the fleet to place before a match starts.
pub trait ShipDefinitionSource {
    fn load(&self) -> Result<Vec<ShipDefinition>, DefinitionError>;
}

/// The built-in fleet of straight ships.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFleet;

impl ShipDefinitionSource for StandardFleet {
    fn load(&self) -> Result<Vec<ShipDefinition>, DefinitionError> {
        standard_fleet().map_err(|source| DefinitionError::InvalidShape {
            ship_type: "standard fleet".to_string(),
            source,
        })
    }
}

/// Definitions held in memory in the text format.
#[derive(Debug, Clone)]
pub struct TextDefinitions {
    text: String,
}

impl TextDefinitions {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ShipDefinitionSource for TextDefinitions {
    fn load(&self) -> Result<Vec<ShipDefinition>, DefinitionError> {
        parse_definitions(&self.text)
    }
}

impl ShipDefinitionSource for Vec<ShipDefinition> {
    fn load(&self) -> Result<Vec<ShipDefinition>, DefinitionError> {
        if self.is_empty() {
            return Err(DefinitionError::NoShips);
        }
        Ok(self.clone())
    }
}

#[cfg(feature = "std")]
pub use self::file::DefinitionsFile;

#[cfg(feature = "std")]
mod file {
    use std::fs;
    use std::path::PathBuf;

    use super::{parse_definitions, ShipDefinitionSource};
    use crate::common::DefinitionError;
    use crate::placement::ShipDefinition;

    /// Definitions read from a file in the text format.
    #[derive(Debug, Clone)]
    pub struct DefinitionsFile {
        path: PathBuf,
    }

    impl DefinitionsFile {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    impl ShipDefinitionSource for DefinitionsFile {
        fn load(&self) -> Result<Vec<ShipDefinition>, DefinitionError> {
            let text = fs::read_to_string(&self.path)?;
            let definitions = parse_definitions(&text)?;
            log::debug!(
                "loaded {} ship definitions from {}",
                definitions.len(),
                self.path.display()
            );
            Ok(definitions)
        }
    }
}

/// Parse ship definitions in the text format.
pub fn parse_definitions(text: &str) -> Result<Vec<ShipDefinition>, DefinitionError> {
    let mut definitions = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    for line in text.lines().map(|l| l.trim_end_matches('\r')) {
        if line.trim().is_empty() {
            if !block.is_empty() {
                definitions.push(parse_block(&block)?);
                block.clear();
            }
        } else {
            block.push(line);
        }
    }
    if !block.is_empty() {
        definitions.push(parse_block(&block)?);
    }
    if definitions.is_empty() {
        return Err(DefinitionError::NoShips);
    }
    Ok(definitions)
}

fn parse_block(block: &[&str]) -> Result<ShipDefinition, DefinitionError> {
    let (label, rows) = match block.split_first() {
        Some(split) => split,
        None => return Err(DefinitionError::NoShips),
    };
    let ship_type = label.trim().to_string();
    if rows.is_empty() {
        return Err(DefinitionError::MissingShape { ship_type });
    }
    let shape = Shape::from_rows(
        rows.iter()
            .map(|row| row.chars().map(|c| c == 'X' || c == 'x')),
    );
    match shape {
        Ok(shape) => Ok(ShipDefinition::new(ship_type, shape)),
        Err(source) => Err(DefinitionError::InvalidShape { ship_type, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_padding() {
        let defs = parse_definitions("L\r\nX\r\nXX\r\n").unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].ship_type(), "L");
        let shape = defs[0].shape();
        assert_eq!((shape.width(), shape.height()), (2, 2));
        assert!(!shape.is_occupied(1, 0));
        assert_eq!(shape.cell_count(), 3);
    }

    #[test]
    fn label_only_block() {
        let err = parse_definitions("Carrier\nXXXXX\n\nGhost\n").unwrap_err();
        assert!(matches!(err, DefinitionError::MissingShape { ref ship_type } if ship_type == "Ghost"));
    }
}
