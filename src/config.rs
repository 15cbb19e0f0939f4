use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::{ResourceStore, TriggerMode};
use crate::utils::find_project_root;

pub const CONFIG_FILE_NAME: &str = ".arbifyrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Localization directory, relative to the project root.
    #[serde(default = "default_l10n_dir")]
    pub l10n_dir: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_resource_extension")]
    pub resource_extension: String,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default)]
    pub trigger_mode: TriggerMode,
    #[serde(default = "default_run_hook")]
    pub run_hook: bool,
}

fn default_l10n_dir() -> String {
    "lib/l10n".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_file_prefix() -> String {
    "app".to_string()
}

fn default_resource_extension() -> String {
    "arb".to_string()
}

fn default_source_extensions() -> Vec<String> {
    vec!["dart".to_string()]
}

fn default_run_hook() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            l10n_dir: default_l10n_dir(),
            default_locale: default_locale(),
            file_prefix: default_file_prefix(),
            resource_extension: default_resource_extension(),
            source_extensions: default_source_extensions(),
            trigger_mode: TriggerMode::default(),
            run_hook: default_run_hook(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Extensions are bare (`arb`, not `.arb`); locale and prefix make up the
    /// default file name and must not be empty.
    pub fn validate(&self) -> Result<()> {
        validate_extension("resourceExtension", &self.resource_extension)?;
        if self.source_extensions.is_empty() {
            bail!("'sourceExtensions' must list at least one extension");
        }
        for ext in &self.source_extensions {
            validate_extension("sourceExtensions", ext)?;
        }
        if self.default_locale.trim().is_empty() {
            bail!("'defaultLocale' must not be empty");
        }
        if self.file_prefix.trim().is_empty() {
            bail!("'filePrefix' must not be empty");
        }
        if self.l10n_dir.trim().is_empty() {
            bail!("'l10nDir' must not be empty");
        }
        Ok(())
    }

    /// The resource store for a project rooted at `project_root`.
    pub fn resource_store(&self, project_root: &Path) -> ResourceStore {
        ResourceStore::new(
            project_root.join(&self.l10n_dir),
            &self.resource_extension,
            &self.file_prefix,
            &self.default_locale,
        )
    }
}

fn validate_extension(field: &str, ext: &str) -> Result<()> {
    if ext.is_empty() || ext.contains('.') || ext.contains(['/', '\\']) {
        bail!(
            "Invalid extension in '{}': \"{}\" (use a bare extension like \"arb\")",
            field,
            ext
        );
    }
    Ok(())
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory that resource paths are relative to: where the config file
    /// lives, else the nearest `pubspec.yaml` or git repository, else `start_dir`.
    pub project_root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            let project_root = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!("Loaded config from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                project_root,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            project_root: find_project_root(start_dir).unwrap_or_else(|| start_dir.to_path_buf()),
            from_file: false,
        }),
    }
}
