//! # Engine Configuration
//!
//! Deployment-level parameters that are not part of the token's own
//! metadata. Token metadata (name, symbol, decimals) arrives in `InitMsg`.

use thiserror::Error;

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Denomination of the native coin held in escrow.
    pub native_denom: String,
    /// Execute responses are padded to a multiple of this many bytes.
    pub response_block_size: usize,
    /// Page size used when a history query omits one.
    pub default_page_size: u32,
    /// Upper bound on any requested page size.
    pub max_page_size: u32,
    /// Prefix of generated viewing keys.
    pub viewing_key_prefix: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            native_denom: "uscrt".to_string(),
            response_block_size: 256,
            default_page_size: 10,
            max_page_size: 100,
            viewing_key_prefix: "api_key_".to_string(),
        }
    }
}

impl EngineConfig {
    /// Validate configuration.
    ///
    /// # Returns
    ///
    /// Returns `Err` if:
    /// - the native denom is empty
    /// - the response block size is zero
    /// - the default page size is zero or above the maximum
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.native_denom.is_empty() {
            return Err(ConfigError::EmptyDenom);
        }
        if self.response_block_size == 0 {
            return Err(ConfigError::ZeroBlockSize);
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::InvalidPageSize {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Native denom not set.
    #[error("native denom must not be empty")]
    EmptyDenom,

    /// Padding block of zero bytes.
    #[error("response block size must be positive")]
    ZeroBlockSize,

    /// Default page size is zero or exceeds the maximum.
    #[error("default page size {default} must be in 1..={max}")]
    InvalidPageSize {
        /// Configured default.
        default: u32,
        /// Configured maximum.
        max: u32,
    },
}
