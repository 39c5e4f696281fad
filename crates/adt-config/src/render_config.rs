//! Render configuration file format and operations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::paths;

/// Bit depths the WAV writer accepts.
pub const SUPPORTED_BIT_DEPTHS: [u16; 3] = [16, 24, 32];

/// Settings for offline rendering.
///
/// # TOML Format
///
/// ```toml
/// block_size = 512
/// bit_depth = 24
/// flush = true
///
/// # Optional: pseudo-random block sizes instead of `block_size`
/// vary_min = 64
/// vary_max = 1024
/// seed = 7
/// ```
///
/// Every field is optional; missing fields take the [`Default`] values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Fixed block size, used unless a varying range is set.
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Smallest block when varying block sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vary_min: Option<usize>,

    /// Largest block when varying block sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vary_max: Option<usize>,

    /// Seed for varying block sizes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,

    /// Output bit depth (16, 24 or 32).
    #[serde(default = "default_bit_depth")]
    pub bit_depth: u16,

    /// Append silence so the delayed right-channel tail is kept.
    #[serde(default)]
    pub flush: bool,
}

fn default_block_size() -> usize {
    512
}

fn default_bit_depth() -> u16 {
    32
}

/// Block chunking selected by a [`RenderConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSizing {
    /// Constant block size.
    Fixed(usize),
    /// Seeded pseudo-random sizes in `min..=max`.
    Varying {
        /// Smallest block.
        min: usize,
        /// Largest block.
        max: usize,
        /// PRNG seed.
        seed: u32,
    },
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            vary_min: None,
            vary_max: None,
            seed: None,
            bit_depth: default_bit_depth(),
            flush: false,
        }
    }
}

impl RenderConfig {
    /// Seed used when varying block sizes without an explicit seed.
    pub const DEFAULT_SEED: u32 = 0x5EED;

    /// Set the fixed block size and clear any varying range.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self.vary_min = None;
        self.vary_max = None;
        self
    }

    /// Vary block sizes over `min..=max`.
    pub fn with_vary(mut self, min: usize, max: usize) -> Self {
        self.vary_min = Some(min);
        self.vary_max = Some(max);
        self
    }

    /// Set the seed for varying block sizes.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the output bit depth.
    pub fn with_bit_depth(mut self, bit_depth: u16) -> Self {
        self.bit_depth = bit_depth;
        self
    }

    /// Enable or disable flushing.
    pub fn with_flush(mut self, flush: bool) -> Self {
        self.flush = flush;
        self
    }

    /// Block chunking this configuration selects.
    ///
    /// Call [`validate`](Self::validate) first; an incomplete range falls
    /// back to the fixed block size.
    pub fn block_sizing(&self) -> BlockSizing {
        match (self.vary_min, self.vary_max) {
            (Some(min), Some(max)) => BlockSizing::Varying {
                min,
                max,
                seed: self.seed.unwrap_or(Self::DEFAULT_SEED),
            },
            _ => BlockSizing::Fixed(self.block_size),
        }
    }

    /// Checks every field against what the renderer and WAV writer accept.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size < 2 {
            return Err(ConfigError::invalid(
                "block_size",
                format!("must be at least 2, got {}", self.block_size),
            ));
        }

        match (self.vary_min, self.vary_max) {
            (None, None) => {}
            (Some(min), Some(max)) => {
                if min < 2 {
                    return Err(ConfigError::invalid(
                        "vary_min",
                        format!("must be at least 2, got {min}"),
                    ));
                }
                if min > max {
                    return Err(ConfigError::invalid(
                        "vary_max",
                        format!("must not be below vary_min ({max} < {min})"),
                    ));
                }
            }
            (Some(_), None) => {
                return Err(ConfigError::invalid("vary_max", "required with vary_min"));
            }
            (None, Some(_)) => {
                return Err(ConfigError::invalid("vary_min", "required with vary_max"));
            }
        }

        if !SUPPORTED_BIT_DEPTHS.contains(&self.bit_depth) {
            return Err(ConfigError::invalid(
                "bit_depth",
                format!("must be 16, 24 or 32, got {}", self.bit_depth),
            ));
        }

        Ok(())
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if given, else the user's default config file if it
    /// exists, else the defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = paths::default_config_path();
                if default_path.is_file() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
