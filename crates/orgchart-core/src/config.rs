use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "orgchart.toml";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ORGCHART_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub hierarchy: HierarchyConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// Snapshot used when no `--members` flag is given. Relative paths are
    /// resolved against the directory holding the config file.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchyConfig {
    /// Trees deeper than this are logged as a warning.
    #[serde(default = "default_max_depth_warning")]
    pub max_depth_warning: usize,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            max_depth_warning: default_max_depth_warning(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    /// Where `project` was read from; `None` when defaults were used.
    pub source: Option<PathBuf>,
    pub resolved_output: String,
}

impl EffectiveConfig {
    /// Snapshot path from config, resolved against the config file's
    /// directory.
    #[must_use]
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        let path = self.project.snapshot.path.as_ref()?;
        if path.is_absolute() {
            return Some(path.clone());
        }
        let base = self
            .source
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(path))
    }
}

/// Locate the config file: `$ORGCHART_CONFIG` first, then
/// `orgchart.toml` under `working_dir`.
#[must_use]
pub fn config_path(working_dir: &Path) -> Option<PathBuf> {
    if let Ok(explicit) = env::var(CONFIG_ENV) {
        if !explicit.trim().is_empty() {
            return Some(PathBuf::from(explicit));
        }
    }
    let path = working_dir.join(CONFIG_FILE_NAME);
    path.exists().then_some(path)
}

/// Load the config at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`ProjectConfig`].
pub fn load_project_config(path: &Path) -> Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve config and the output mode for this invocation.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be loaded.
pub fn resolve_config(working_dir: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let source = config_path(working_dir);
    let project = match &source {
        Some(path) => load_project_config(path)?,
        None => ProjectConfig::default(),
    };

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        project.output.format.clone(),
        env_format,
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        source,
        resolved_output,
    })
}

fn resolve_output(
    cli_json: bool,
    config_output: Option<String>,
    env_format: Option<String>,
    is_tty: bool,
) -> String {
    fn normalize_output_mode(raw: &str) -> Option<&'static str> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" | "human" => Some("pretty"),
            "text" | "table" => Some("text"),
            "json" => Some("json"),
            _ => None,
        }
    }

    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = config_output.as_deref().and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if is_tty { "pretty" } else { "text" }.to_string()
}

const fn default_max_depth_warning() -> usize {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_fields_missing() {
        let cfg: ProjectConfig = toml::from_str("").expect("empty config parses");
        assert!(cfg.snapshot.path.is_none());
        assert_eq!(cfg.hierarchy.max_depth_warning, 12);
        assert!(cfg.output.format.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let cfg: ProjectConfig = toml::from_str(
            r#"
            [snapshot]
            path = "data/members.json"

            [hierarchy]
            max_depth_warning = 4

            [output]
            format = "json"
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.snapshot.path, Some(PathBuf::from("data/members.json")));
        assert_eq!(cfg.hierarchy.max_depth_warning, 4);
        assert_eq!(cfg.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[hierarchy\nmax_depth_warning = ").expect("write");

        let err = load_project_config(&path).unwrap_err();
        assert!(format!("{err:#}").contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn snapshot_path_resolves_relative_to_config() {
        let effective = EffectiveConfig {
            project: ProjectConfig {
                snapshot: SnapshotConfig {
                    path: Some(PathBuf::from("members.json")),
                },
                ..ProjectConfig::default()
            },
            source: Some(PathBuf::from("/etc/orgchart/orgchart.toml")),
            resolved_output: "text".to_string(),
        };
        assert_eq!(
            effective.snapshot_path(),
            Some(PathBuf::from("/etc/orgchart/members.json"))
        );
    }

    #[test]
    fn output_precedence() {
        assert_eq!(resolve_output(true, Some("text".into()), Some("pretty".into()), true), "json");
        assert_eq!(resolve_output(false, Some("text".into()), Some("pretty".into()), false), "pretty");
        assert_eq!(resolve_output(false, Some("table".into()), None, true), "text");
        assert_eq!(resolve_output(false, Some("bogus".into()), None, true), "pretty");
        assert_eq!(resolve_output(false, None, None, false), "text");
    }
}
