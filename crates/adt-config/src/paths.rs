//! Platform-specific configuration paths.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/adt/` (Linux), `~/Library/Application Support/adt/` (macOS), `%APPDATA%\adt\` (Windows)
//! - **Render config**: `render.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use adt_config::paths;
//!
//! let path = paths::default_config_path();
//! println!("Render config: {}", path.display());
//! ```

use std::path::PathBuf;

/// Application name used for directory paths.
const APP_NAME: &str = "adt";

/// File name of the render configuration.
pub const CONFIG_FILE_NAME: &str = "render.toml";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/adt/`
/// - macOS: `~/Library/Application Support/adt/`
/// - Windows: `%APPDATA%\adt\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path of the default render configuration file.
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}
