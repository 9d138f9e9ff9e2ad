//! Layered editor configuration
//!
//! Config is loaded with three layers of precedence (highest wins):
//! 1. Environment variables: `GARRISON_SCRIPT`, `GARRISON_WORKSPACE`
//! 2. Project-local: `.garrison/config.toml`
//! 3. Global: `~/.garrison/config.toml`

use garrison_core::{GarrisonError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The script filename the game ships with; used when nothing else is
/// configured
pub const DEFAULT_SCRIPT: &str = "bot_spawn_commands.txt";

const DEFAULT_WORKSPACE: &str = "workspace.json";

/// `[editor]` section of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorSection {
    #[serde(default)]
    pub default_script: Option<String>,
    #[serde(default)]
    pub workspace: Option<String>,
}

/// Top-level config file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EditorConfigFile {
    #[serde(default)]
    editor: EditorSection,
}

/// Resolved configuration with environment overrides applied
#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    pub default_script: Option<String>,
    pub workspace: Option<String>,
}

impl EditorConfig {
    /// Load config with layered precedence: global < project < env vars
    pub fn load() -> Result<Self> {
        let mut config = EditorConfigFile::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                Self::merge_into(&mut config, global);
            }
        }

        let local_path = PathBuf::from(".garrison/config.toml");
        if local_path.exists() {
            let local = Self::load_file(&local_path)?;
            Self::merge_into(&mut config, local);
        }

        let mut resolved = Self {
            default_script: config.editor.default_script,
            workspace: config.editor.workspace,
        };
        resolved.apply_env_overrides();
        Ok(resolved)
    }

    /// Load config from a specific file path only (for testing)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = Self::load_file(path)?;
        let mut resolved = Self {
            default_script: file.editor.default_script,
            workspace: file.editor.workspace,
        };
        resolved.apply_env_overrides();
        Ok(resolved)
    }

    /// Resolve the script path: explicit flag, then config, then the
    /// stock filename
    pub fn script_path(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.default_script.clone())
            .unwrap_or_else(|| DEFAULT_SCRIPT.to_string())
    }

    /// Resolve the workspace path the same way
    pub fn workspace_path(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.workspace.clone())
            .unwrap_or_else(|| DEFAULT_WORKSPACE.to_string())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".garrison").join("config.toml"))
    }

    fn load_file(path: &Path) -> Result<EditorConfigFile> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfigFile = toml::from_str(&content).map_err(|e| {
            GarrisonError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    fn merge_into(base: &mut EditorConfigFile, overlay: EditorConfigFile) {
        if overlay.editor.default_script.is_some() {
            base.editor.default_script = overlay.editor.default_script;
        }
        if overlay.editor.workspace.is_some() {
            base.editor.workspace = overlay.editor.workspace;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(script) = std::env::var("GARRISON_SCRIPT") {
            self.default_script = Some(script);
        }
        if let Ok(workspace) = std::env::var("GARRISON_WORKSPACE") {
            self.workspace = Some(workspace);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_config(content: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("garrison_config_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_config_from_file() {
        std::env::remove_var("GARRISON_SCRIPT");
        std::env::remove_var("GARRISON_WORKSPACE");

        let config_str = r#"
[editor]
default_script = "missions/alpha.txt"
workspace = "missions/alpha.workspace.json"
"#;
        let path = temp_config(config_str);
        let config = EditorConfig::load_from_file(&path).unwrap();

        assert_eq!(config.script_path(None), "missions/alpha.txt");
        assert_eq!(
            config.workspace_path(None),
            "missions/alpha.workspace.json"
        );

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_explicit_flag_wins() {
        std::env::remove_var("GARRISON_SCRIPT");
        let config = EditorConfig {
            default_script: Some("configured.txt".into()),
            workspace: None,
        };
        assert_eq!(config.script_path(Some("flagged.txt")), "flagged.txt");
        assert_eq!(config.workspace_path(None), "workspace.json");
    }

    #[test]
    fn test_stock_filename_fallback() {
        let config = EditorConfig::default();
        assert_eq!(config.script_path(None), DEFAULT_SCRIPT);
    }

    #[test]
    fn test_env_var_override() {
        let path = temp_config("[editor]\ndefault_script = \"file.txt\"\n");

        std::env::set_var("GARRISON_SCRIPT", "env.txt");
        let config = EditorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.script_path(None), "env.txt");
        std::env::remove_var("GARRISON_SCRIPT");

        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_malformed_config_is_config_error() {
        let path = temp_config("[editor\nbroken");
        let err = EditorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, GarrisonError::ConfigError(_)));
        std::fs::remove_file(&path).ok();
        std::fs::remove_dir(path.parent().unwrap()).ok();
    }
}
