//! Harvest module tying fetching, normalization and output together
//!
//! This module contains:
//! - The dataset selector used by the CLI
//! - The harvest coordinator that runs the whole pipeline

mod coordinator;

pub use coordinator::{
    export_characters, run_harvest, CharacterData, EquipmentData, HarvestOptions, Harvester,
    BACKGROUNDS_FILE, CLASSES_FILE, EQUIPMENT_FILE, RACES_FILE,
};

use std::fmt;

/// Which group of endpoints a harvest covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// Races, classes and backgrounds
    Characters,
    /// Magic items, weapons and armor
    Equipment,
    /// Everything
    All,
}

impl Dataset {
    /// Returns true if races, classes and backgrounds are harvested
    pub fn includes_characters(&self) -> bool {
        matches!(self, Self::Characters | Self::All)
    }

    /// Returns true if equipment is harvested
    pub fn includes_equipment(&self) -> bool {
        matches!(self, Self::Equipment | Self::All)
    }

    /// Converts the dataset to its command-line token
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Characters => "characters",
            Self::Equipment => "equipment",
            Self::All => "all",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
