//! Adapter configuration.
//!
//! Format adapters consult `IoConfig` for behaviour that differs between
//! collections. The defaults match plain deck lists and collection exports;
//! the CLI sets the switches from global flags.

use serde::{Deserialize, Serialize};

use crate::cards::PrintIdentity;

/// Switches for reading and writing stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Treat the CSV `Collector Number` column as part of print identity.
    pub collector_number_identity: bool,

    /// Count `Sideboard` entries when reading deck lists.
    /// By default only the mainboard is read.
    pub include_sideboard: bool,

    /// Sort deck-list output by card name instead of display order.
    pub sort_deck_list: bool,
}

impl IoConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Include collector numbers in print identity.
    #[must_use]
    pub fn with_collector_number_identity(mut self, enabled: bool) -> Self {
        self.collector_number_identity = enabled;
        self
    }

    /// Read sideboard entries too.
    #[must_use]
    pub fn with_sideboard(mut self, enabled: bool) -> Self {
        self.include_sideboard = enabled;
        self
    }

    /// Sort deck-list output by name.
    #[must_use]
    pub fn with_sorted_deck_list(mut self, enabled: bool) -> Self {
        self.sort_deck_list = enabled;
        self
    }

    /// Identity mode for prints produced by readers.
    #[must_use]
    pub fn print_identity(&self) -> PrintIdentity {
        if self.collector_number_identity {
            PrintIdentity::WithCollectorNumber
        } else {
            PrintIdentity::Standard
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IoConfig::new();
        assert!(!config.collector_number_identity);
        assert!(!config.include_sideboard);
        assert!(!config.sort_deck_list);
        assert_eq!(config.print_identity(), PrintIdentity::Standard);
    }

    #[test]
    fn test_builder() {
        let config = IoConfig::new()
            .with_collector_number_identity(true)
            .with_sideboard(true)
            .with_sorted_deck_list(true);

        assert!(config.include_sideboard);
        assert!(config.sort_deck_list);
        assert_eq!(config.print_identity(), PrintIdentity::WithCollectorNumber);
    }
}
