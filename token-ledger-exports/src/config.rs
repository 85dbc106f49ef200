//! This file defines a config structure containing all settings for the ledger system

/// Ledger configuration
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    /// upper bound accepted when decoding an asset metadata blob; the wire
    /// format itself caps it at `u16::MAX`
    pub max_asset_metadata_length: u16,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_asset_metadata_length: u16::MAX,
        }
    }
}
