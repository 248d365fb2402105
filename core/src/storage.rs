use std::path::Path;

use crate::config::Config;
use crate::error::ExtractError;
use crate::io::{parse_json, read_to_string};

/// Leser inn konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ExtractError> {
    let path = path.as_ref();
    match read_to_string(path)? {
        Some(contents) => {
            let cfg: Config = parse_json(&contents, path)?;
            log::info!(
                "📂 Konfig lastet fra {} (terskel={} m/s, tz={})",
                path.display(),
                cfg.threshold_speed_ms,
                cfg.local_tz.name()
            );
            Ok(cfg)
        }
        None => {
            log::warn!(
                "⚠️ Fant ikke konfig på {}, bruker default",
                path.display()
            );
            Ok(Config::default())
        }
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config(cfg: &Config, path: impl AsRef<Path>) -> Result<(), ExtractError> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(cfg).map_err(|source| ExtractError::Json {
        path: path.to_path_buf(),
        line: None,
        source,
    })?;
    std::fs::write(path, json).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("✅ Konfig lagret til {}", path.display());
    Ok(())
}
