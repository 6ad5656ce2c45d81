//! Layered configuration.
//!
//! The project file names the graph and export files; the user file only
//! carries a preferred output mode. Both are optional TOML and every key has
//! a default.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Project config file, relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = ".cinegraph/config.toml";

/// User config file, relative to the platform config directory.
pub const USER_CONFIG_PATH: &str = "cinegraph/config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_file")]
    pub file: PathBuf,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            file: default_graph_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_file")]
    pub file: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file: default_export_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Graph file path resolved against `project_root` when relative.
    #[must_use]
    pub fn graph_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.graph.file)
    }

    /// Export file path resolved against `project_root` when relative.
    #[must_use]
    pub fn export_path(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.project.export.file)
    }
}

/// Read `.cinegraph/config.toml` under `project_root`, or defaults when the
/// file is absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    read_toml_or_default(&project_root.join(PROJECT_CONFIG_PATH))
}

/// Read `<config_dir>/cinegraph/config.toml`, or defaults when there is no
/// config directory or no file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    dirs::config_dir().map_or_else(
        || Ok(UserConfig::default()),
        |dir| read_toml_or_default(&dir.join(USER_CONFIG_PATH)),
    )
}

fn read_toml_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str::<T>(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load both config layers and settle the output mode.
///
/// # Errors
///
/// Propagates failures from [`load_project_config`] and [`load_user_config`].
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

/// `--json`, then `FORMAT`, then the user config, then the TTY default.
/// Unrecognised values are skipped.
fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    let mode = if cli_json {
        "json"
    } else if let Some(mode) = env_format.and_then(normalize_output_mode) {
        mode
    } else if let Some(mode) = user_output.and_then(normalize_output_mode) {
        mode
    } else if is_tty {
        "pretty"
    } else {
        "text"
    };
    mode.to_string()
}

fn default_graph_file() -> PathBuf {
    PathBuf::from("grafo.txt")
}

fn default_export_file() -> PathBuf {
    PathBuf::from("listaParaOGrafoOnline.txt")
}
