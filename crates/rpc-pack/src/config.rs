//! Packer construction settings.

use std::io::Write;

use mpack_rpc_buffers::{Grow, Packer, WriteFlush, MIN_CAPACITY, STRING_BUFFER_INITIAL_CAPACITY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid packer config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Settings for packers built by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackerConfig {
    /// Size of the buffer in bytes: the first allocation of an in-memory
    /// packer, or the chunk size of a streaming one.
    pub initial_capacity: usize,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            initial_capacity: STRING_BUFFER_INITIAL_CAPACITY,
        }
    }
}

impl PackerConfig {
    /// Parses a JSON config; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str::<Self>(json)?.validated())
    }

    /// Raises the capacity to the packer minimum if it is below it.
    pub fn validated(self) -> Self {
        if self.initial_capacity < MIN_CAPACITY {
            tracing::debug!(
                requested = self.initial_capacity,
                used = MIN_CAPACITY,
                "packer capacity raised to the minimum"
            );
        }
        Self {
            initial_capacity: self.initial_capacity.max(MIN_CAPACITY),
        }
    }

    pub fn string_buffer(&self) -> Packer<Grow> {
        Packer::with_capacity(self.validated().initial_capacity)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Packer<WriteFlush<W>> {
        Packer::to_writer(writer, self.validated().initial_capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_string_buffer() {
        assert_eq!(PackerConfig::default().initial_capacity, 64);
        assert_eq!(PackerConfig::from_json("{}").unwrap(), PackerConfig::default());
    }

    #[test]
    fn small_capacity_is_raised() {
        let config = PackerConfig::from_json(r#"{"initial_capacity": 4}"#).unwrap();
        assert_eq!(config.initial_capacity, MIN_CAPACITY);
        assert_eq!(config.string_buffer().buffer().capacity(), MIN_CAPACITY);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            PackerConfig::from_json(r#"{"capacity": 4}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn streaming_packer_uses_configured_size() {
        let config = PackerConfig {
            initial_capacity: 256,
        };
        assert_eq!(config.to_writer(Vec::new()).buffer().capacity(), 256);
    }
}
