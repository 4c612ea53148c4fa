use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

pub const CONFIG_CANDIDATES: &[(&str, ConfigFormat)] = &[
    ("qtc-open.yml", ConfigFormat::Yaml),
    ("qtc-open.yaml", ConfigFormat::Yaml),
    ("qtc-open.toml", ConfigFormat::Toml),
];

/// Environment variable that overrides `qtCreatorPath` when non-empty.
pub const QTCREATOR_PATH_ENV: &str = "QTC_OPEN_QTCREATOR_PATH";

#[derive(Debug, Clone, Copy)]
pub enum ConfigFormat {
    Yaml,
    Toml,
}

/// How the target path is picked once a workspace is known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionMode {
    /// Open the first workspace folder as-is.
    #[default]
    Workspace,
    /// Open the nearest directory holding a CMakeLists.txt or *.pro file.
    #[value(alias = "projectRoot")]
    ProjectRoot,
}

/// Settings consumed by the resolver and the launcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LauncherConfig {
    pub qt_creator_path: String,
    pub open_with_file: bool,
    pub target_mode: ResolutionMode,
}

#[derive(Debug, Clone)]
pub struct LoadedLauncherConfig {
    pub path: Option<PathBuf>,
    pub data: LauncherConfig,
}

/// Values given on the command line; `None`/`false` leave the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub qt_creator_path: Option<String>,
    pub target_mode: Option<ResolutionMode>,
    pub open_with_file: bool,
}

impl LauncherConfig {
    /// Applies environment and CLI overrides, CLI winning.
    pub fn with_overrides(mut self, env_path: Option<&str>, overrides: &ConfigOverrides) -> Self {
        if let Some(path) = env_path.map(str::trim).filter(|p| !p.is_empty()) {
            self.qt_creator_path = path.to_string();
        }
        if let Some(path) = overrides.qt_creator_path.as_deref() {
            self.qt_creator_path = path.to_string();
        }
        if let Some(mode) = overrides.target_mode {
            self.target_mode = mode;
        }
        if overrides.open_with_file {
            self.open_with_file = true;
        }
        self
    }
}

/// Loads the config from `base_dir` (or defaults) and layers the overrides on top.
pub fn load_launcher_config(
    base_dir: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<LoadedLauncherConfig> {
    let loaded = match base_dir {
        Some(dir) => load_launcher_config_from_dir(dir)?,
        None => None,
    };
    let (path, data) = match loaded {
        Some(cfg) => (cfg.path, cfg.data),
        None => (None, LauncherConfig::default()),
    };

    let env_path = std::env::var(QTCREATOR_PATH_ENV).ok();
    let data = data.with_overrides(env_path.as_deref(), overrides);
    tracing::debug!(?path, ?data, "effective launcher config");
    Ok(LoadedLauncherConfig { path, data })
}

pub fn load_launcher_config_from_dir(base_dir: &Path) -> Result<Option<LoadedLauncherConfig>> {
    for (file, format) in CONFIG_CANDIDATES {
        let path = base_dir.join(file);
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading launcher config at {}", path.display()))?;
        let data = match format {
            ConfigFormat::Yaml => parse_yaml_str(&content)
                .with_context(|| format!("parsing YAML config at {}", path.display()))?,
            ConfigFormat::Toml => parse_toml_str(&content)
                .with_context(|| format!("parsing TOML config at {}", path.display()))?,
        };
        return Ok(Some(LoadedLauncherConfig {
            path: Some(path),
            data,
        }));
    }
    Ok(None)
}

pub(crate) fn parse_yaml_str(content: &str) -> Result<LauncherConfig> {
    // An empty YAML document deserializes to unit, not to an empty map.
    if content.trim().is_empty() {
        return Ok(LauncherConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}

pub(crate) fn parse_toml_str(content: &str) -> Result<LauncherConfig> {
    Ok(toml::from_str(content)?)
}
