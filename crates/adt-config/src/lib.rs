//! Configuration for the ADT command-line tools.
//!
//! # Features
//!
//! - **Render config**: Block size (fixed or varying), output bit depth and
//!   flushing, stored as TOML
//! - **Validation**: Rejects values the renderer would refuse
//! - **Paths**: Platform-specific config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use adt_config::{RenderConfig, default_config_path};
//!
//! let config = RenderConfig::default()
//!     .with_vary(64, 1024)
//!     .with_bit_depth(24)
//!     .with_flush(true);
//! config.save(default_config_path()).unwrap();
//!
//! let loaded = RenderConfig::load_or_default(None).unwrap();
//! assert_eq!(loaded, config);
//! ```

mod error;
mod render_config;

/// Platform-specific configuration paths.
pub mod paths;

pub use error::ConfigError;
pub use paths::{default_config_path, user_config_dir};
pub use render_config::{BlockSizing, RenderConfig, SUPPORTED_BIT_DEPTHS};
