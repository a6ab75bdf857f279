/// `load_config` module: reads the optional YAML config file and merges it with
/// command-line flags and environment variables into the explicit core config.
///
/// # Responsibilities
/// - Parse `.crev-config.yaml` (or the file named by `--config`) into [`CliConfig`]
/// - Apply precedence: flag, then environment, then config file, then defaults
/// - Produce a [`BundleConfig`] for the bundling pipeline and an API key for reviews
/// - Write the default config template for `crev init`
///
/// # Errors
/// All errors use `anyhow::Error` with a hint on how to fix the problem; they are
/// surfaced at the CLI boundary.
use anyhow::{bail, Context, Result};
use crev_core::config::BundleConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Config file looked up in the current directory when `--config` is not given.
pub const CONFIG_FILE: &str = ".crev-config.yaml";

/// Environment variable that can carry the API key.
pub const API_KEY_ENV: &str = "CREV_API_KEY";

/// Template written by `crev init`.
pub const DEFAULT_CONFIG: &str = r#"# Configuration for the crev tool
# specify your CREV API key (necessary for the review command)
api-key: # crev_xxx
# specify the prefixes of files and directories to ignore (by default common configuration files are ignored)
ignore-prefixes: # ex. [tests, build, readme.md]
# specify the extensions of files to ignore
ignore-extensions: # ex. [.txt, .md]
# specify the extensions of files to include
include-extensions: # ex. [.go, .py, .js]
"#;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub ignore_prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub ignore_extensions: Option<Vec<String>>,
    #[serde(default)]
    pub include_extensions: Option<Vec<String>>,
}

/// Filter flags given to `crev bundle`. Empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct BundleFlags {
    pub ignore_pre: Vec<String>,
    pub ignore_ext: Vec<String>,
    pub include_ext: Vec<String>,
}

/// Loads and parses a YAML config file. The file must exist.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CliConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => {
            info!(config_path = ?path_ref, "Config file read successfully");
            content
        }
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}. Run `crev init` to create one.",
                path_ref,
                e
            ));
        }
    };

    // Comment-only or empty documents parse as null.
    let raw: serde_yaml::Value = match serde_yaml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!(
                "Failed to parse config YAML {:?}: {e}",
                path_ref
            ));
        }
    };
    if raw.is_null() {
        return Ok(CliConfig::default());
    }

    let config: CliConfig = serde_yaml::from_value(raw)
        .map_err(|e| anyhow::anyhow!("Failed to parse config YAML {:?}: {e}", path_ref))?;
    info!(config_path = ?path_ref, "Parsed config YAML successfully");
    Ok(config)
}

/// Loads the explicitly named config, or the default file if it exists.
///
/// A missing default file is not an error; a missing explicit file is.
pub fn load_config_or_default(explicit: Option<&Path>) -> Result<CliConfig> {
    match explicit {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(CONFIG_FILE);
            if default_path.exists() {
                load_config(default_path)
            } else {
                info!("No config file found, using defaults");
                Ok(CliConfig::default())
            }
        }
    }
}

/// Merge flags over the config file and add the standard ignore lists.
pub fn bundle_config(root: impl Into<PathBuf>, flags: BundleFlags, file: &CliConfig) -> BundleConfig {
    let pick = |flag: Vec<String>, configured: &Option<Vec<String>>| {
        if flag.is_empty() {
            configured.clone().unwrap_or_default()
        } else {
            flag
        }
    };
    BundleConfig::with_standard_ignores(
        root,
        pick(flags.ignore_pre, &file.ignore_prefixes),
        pick(flags.include_ext, &file.include_extensions),
        pick(flags.ignore_ext, &file.ignore_extensions),
    )
}

/// API key from the flag, else `CREV_API_KEY`, else the config file.
pub fn resolve_api_key(flag: Option<String>, file: &CliConfig) -> Result<String> {
    let from_env = std::env::var(API_KEY_ENV).ok();
    let key = [flag, from_env, file.api_key.clone()]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty());

    match key {
        Some(key) => Ok(key),
        None => {
            error!("No API key configured");
            bail!(
                "API key is required for this command. Set it under the 'api-key' key in your {CONFIG_FILE}, \
                 export {API_KEY_ENV}, or provide it with --api-key."
            )
        }
    }
}

/// Write [`DEFAULT_CONFIG`] into `dir`, refusing to overwrite an existing file.
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() {
        bail!("Config file already exists at {}", path.display());
    }
    fs::write(&path, DEFAULT_CONFIG)
        .with_context(|| format!("Unable to write config file {}", path.display()))?;
    // Make sure what we wrote is something we can read back.
    load_config(&path)?;
    info!(config_path = %path.display(), "Wrote default config");
    Ok(path)
}
