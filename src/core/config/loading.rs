//! Locates and reads the optional TOML configuration file.

use super::file::ConfigFile;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::PathBuf;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "EMAIL_VETTER_CONFIG";

const LOCAL_CONFIG_NAME: &str = "email-vetter.toml";

/// Returns the first configuration file that exists.
///
/// Search order: `explicit`, then [`CONFIG_ENV_VAR`], then `./email-vetter.toml`,
/// then `$HOME/.config/email-vetter/config.toml`. An explicit path that does
/// not exist is an error; the other locations are optional.
pub fn find_config_file(explicit: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = PathBuf::from(path);
        if path.is_file() {
            return Ok(Some(path));
        }
        return Err(AppError::Config(format!(
            "Config file '{}' not found",
            path.display()
        )));
    }

    let mut candidates = Vec::new();
    if let Ok(from_env) = std::env::var(CONFIG_ENV_VAR) {
        if !from_env.is_empty() {
            candidates.push(PathBuf::from(from_env));
        }
    }
    candidates.push(PathBuf::from(LOCAL_CONFIG_NAME));
    if let Ok(home) = std::env::var("HOME") {
        candidates.push(PathBuf::from(format!(
            "{}/.config/email-vetter/config.toml",
            home
        )));
    }

    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!("Found config file at {}", candidate.display());
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

/// Loads and parses the configuration file, if one is found.
///
/// Returns the parsed file together with the path it was read from.
pub fn load_config_file(explicit: Option<&str>) -> Result<Option<(ConfigFile, String)>> {
    let Some(path) = find_config_file(explicit)? else {
        tracing::debug!("No config file found, using defaults");
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)?;
    let file = ConfigFile::from_toml_str(&contents).map_err(|e| {
        AppError::Config(format!("Failed to parse '{}': {}", path.display(), e))
    })?;
    tracing::info!("Loaded configuration from {}", path.display());
    Ok(Some((file, path.display().to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = find_config_file(Some("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dns]\ndns_timeout = 3").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (parsed, loaded_from) = load_config_file(Some(&path)).unwrap().unwrap();
        assert_eq!(parsed.dns.dns_timeout, Some(3));
        assert_eq!(loaded_from, path);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dns\n").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let err = load_config_file(Some(&path)).unwrap_err();
        assert!(err.to_string().contains(&path));
    }
}
