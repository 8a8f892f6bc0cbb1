//! Configuration file persistence for markup-editor
//!
//! This module handles loading and saving the settings file in the
//! platform-specific config directory, falling back to defaults whenever the
//! file is missing or unreadable.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "markup-editor";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Extension of the temporary file used during atomic writes
const BACKUP_EXTENSION: &str = "json.bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\markup-editor\`
/// - **macOS**: `~/Library/Application Support/markup-editor/`
/// - **Linux**: `~/.config/markup-editor/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the configuration file.
pub fn get_config_file_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

// ─────────────────────────────────────────────────────────────────────────────
// Load Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// Missing, empty, or corrupted files yield default settings; failures are
/// logged rather than returned.
pub fn load_config() -> Settings {
    get_config_file_path()
        .and_then(|path| load_config_from_path(&path))
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

/// Load configuration from an explicit file.
///
/// A missing or empty file is not an error and yields defaults. Invalid JSON
/// is reported as `Error::ConfigFormat`.
pub fn load_config_from_path(config_path: &Path) -> Result<Settings> {
    if !config_path.exists() {
        debug!(
            "Config file not found at {}, using defaults",
            config_path.display()
        );
        return Ok(Settings::default());
    }

    debug!("Loading config from: {}", config_path.display());

    let contents = fs::read_to_string(config_path).map_err(|source| Error::ConfigIo {
        path: config_path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        debug!("Config file is empty, using defaults");
        return Ok(Settings::default());
    }

    let settings = Settings::from_json_sanitized(&contents).map_err(|source| {
        warn!(
            "Config file at {} contains invalid JSON: {}",
            config_path.display(),
            source
        );
        Error::ConfigFormat {
            path: config_path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "Configuration loaded successfully from {}",
        config_path.display()
    );
    Ok(settings)
}

// ─────────────────────────────────────────────────────────────────────────────
// Save Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Save configuration to the default config file location.
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigIo`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to_path(settings, &get_config_file_path()?)
}

/// Save configuration to an explicit file, creating parent directories.
///
/// The JSON is written to a sibling `.bak` file first and then renamed over
/// the target, so a crash never leaves a half-written config behind.
pub fn save_config_to_path(settings: &Settings, config_path: &Path) -> Result<()> {
    if let Some(dir) = config_path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            debug!("Creating config directory: {}", dir.display());
            fs::create_dir_all(dir).map_err(|source| Error::ConfigIo {
                path: dir.to_path_buf(),
                source,
            })?;
        }
    }

    let backup_path = config_path.with_extension(BACKUP_EXTENSION);
    debug!("Saving config to: {}", config_path.display());

    let json = serde_json::to_string_pretty(settings).map_err(|source| Error::ConfigFormat {
        path: config_path.to_path_buf(),
        source,
    })?;

    fs::write(&backup_path, &json).map_err(|source| Error::ConfigIo {
        path: backup_path.clone(),
        source,
    })?;

    fs::rename(&backup_path, config_path).map_err(|source| Error::ConfigIo {
        path: config_path.to_path_buf(),
        source,
    })?;

    info!(
        "Configuration saved successfully to {}",
        config_path.display()
    );
    Ok(())
}

/// Save configuration, ignoring errors.
///
/// Returns `true` if the save was successful, `false` otherwise.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper to create a test environment with a temporary config directory.
    struct TestEnv {
        _temp_dir: TempDir,
        config_file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let config_file = temp_dir.path().join(APP_NAME).join(CONFIG_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                config_file,
            }
        }

        fn write_config(&self, content: &str) {
            if let Some(dir) = self.config_file.parent() {
                fs::create_dir_all(dir).expect("Failed to create config dir");
            }
            fs::write(&self.config_file, content).expect("Failed to write config");
        }

        fn read_config(&self) -> String {
            fs::read_to_string(&self.config_file).expect("Failed to read config")
        }
    }

    #[test]
    fn test_config_file_path_ends_with_app_dir() {
        // dirs::config_dir can be None in stripped-down environments
        if let Ok(path) = get_config_file_path() {
            assert!(path.ends_with(Path::new(APP_NAME).join(CONFIG_FILE_NAME)));
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let env = TestEnv::new();
        let settings = load_config_from_path(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_empty_file_uses_defaults() {
        let env = TestEnv::new();
        env.write_config("   \n");
        let settings = load_config_from_path(&env.config_file).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_partial_config() {
        let env = TestEnv::new();
        env.write_config(r#"{"view": {"line_numbers": false}, "width": 800}"#);
        let settings = load_config_from_path(&env.config_file).unwrap();
        assert!(!settings.view.line_numbers);
        assert!(settings.view.line_wrapping);
        assert_eq!(settings.width, 800.0);
        assert_eq!(settings.height, 500.0);
    }

    #[test]
    fn test_load_corrupted_config_returns_error() {
        let env = TestEnv::new();
        env.write_config("{ invalid json }");
        let result = load_config_from_path(&env.config_file);
        assert!(matches!(result, Err(Error::ConfigFormat { .. })));
    }

    #[test]
    fn test_load_config_sanitizes_values() {
        let env = TestEnv::new();
        env.write_config(r#"{"scroll": {"iterations": 5000}, "cursor_sentinel": "abc"}"#);
        let settings = load_config_from_path(&env.config_file).unwrap();
        assert_eq!(settings.scroll.iterations, Settings::MAX_SCROLL_ITERATIONS);
        assert_eq!(settings.cursor_sentinel, "@@@@@");
    }

    #[test]
    fn test_save_creates_directory_and_round_trips() {
        let env = TestEnv::new();
        let mut saved = Settings::default();
        saved.view.columns.outline = true;
        saved.scroll.smooth = false;
        saved.centering_divisor = 3.0;

        save_config_to_path(&saved, &env.config_file).unwrap();
        assert!(env.config_file.exists());
        assert!(!env.config_file.with_extension(BACKUP_EXTENSION).exists());

        let loaded = load_config_from_path(&env.config_file).unwrap();
        assert_eq!(loaded, saved);
    }

    #[test]
    fn test_save_overwrites_existing() {
        let env = TestEnv::new();
        env.write_config(r#"{"width": 300}"#);

        let settings = Settings {
            width: 640.0,
            ..Settings::default()
        };
        save_config_to_path(&settings, &env.config_file).unwrap();

        let contents = env.read_config();
        let loaded: Settings = serde_json::from_str(&contents).unwrap();
        assert_eq!(loaded.width, 640.0);
    }
}
