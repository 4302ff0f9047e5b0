//! Configuration for huffpack

use crate::error::{CompressError, Result};
use crate::huffman::MergeOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerFormat {
    /// Magic number and version byte followed by the header and body.
    #[default]
    Framed,
    /// Bare header and body with no marker or version byte, with ties
    /// broken the way the original C++ `FileZipper` tool breaks them.
    Legacy,
}

impl ContainerFormat {
    /// Tie-break the tree builder must use for this layout.
    pub fn merge_order(self) -> MergeOrder {
        match self {
            ContainerFormat::Framed => MergeOrder::Ranked,
            ContainerFormat::Legacy => MergeOrder::LegacyHeap,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub format: ContainerFormat,
    pub max_input_size: u64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            format: ContainerFormat::Framed,
            max_input_size: 4 * 1024 * 1024 * 1024, // 4 GiB
        }
    }
}

impl CodecConfig {
    /// Parse a JSON configuration. Missing fields fall back to their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: CodecConfig =
            serde_json::from_str(text).map_err(|e| CompressError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CompressError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_input_size == 0 {
            return Err(CompressError::Config("max_input_size must be positive".into()));
        }
        Ok(())
    }
}
