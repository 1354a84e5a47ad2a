use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Global hotkey combination, e.g. "Ctrl+Alt+M"
    #[serde(default)]
    pub hotkey: Option<String>,
    #[serde(default = "default_keep_selection")]
    pub keep_selection_while_typing: bool,
    #[serde(default = "default_root_slots")]
    pub root_slots: usize,
    #[serde(default = "default_menu_width")]
    pub menu_width: u16,
    /// Root menus, one per slot
    #[serde(default)]
    pub menus: Vec<MenuSpec>,
}

/// Layout of one root menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuSpec {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub rows: Vec<RowSpec>,
}

/// A row; rows with nested `rows` are folders that expand into a submenu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub label: String,
    #[serde(default)]
    pub close_after_open: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<RowSpec>>,
}

fn default_keep_selection() -> bool {
    true
}

fn default_root_slots() -> usize {
    3
}

fn default_menu_width() -> u16 {
    24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: None,
            keep_selection_while_typing: default_keep_selection(),
            root_slots: default_root_slots(),
            menu_width: default_menu_width(),
            menus: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Invalid menu configuration")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = serde_yaml::to_string(self).context("Failed to serialize config")?;
        fs::write(path, text).with_context(|| format!("Failed to write config {}", path.display()))
    }
}

/// Locate the config file: CLI argument, then the user config dir, then ./config.yaml
pub fn get_config_path(cli_path: Option<String>) -> Result<PathBuf> {
    if let Some(path) = cli_path {
        let path = PathBuf::from(path);
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        return Ok(path);
    }

    let user_config = dirs::config_dir().map(|dir| dir.join("cascade-menu").join("config.yaml"));
    let candidates = user_config.iter().cloned().chain([PathBuf::from("config.yaml")]);
    for candidate in candidates {
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    let expected = user_config
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "config.yaml".to_string());
    anyhow::bail!("No config file found. Create {} or pass --config", expected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_fields() {
        let config = Config::from_yaml("menus: []").unwrap();
        assert_eq!(config.hotkey, None);
        assert!(config.keep_selection_while_typing);
        assert_eq!(config.root_slots, 3);
        assert_eq!(config.menu_width, 24);
    }

    #[test]
    fn test_nested_rows() {
        let yaml = r#"
hotkey: Ctrl+Alt+M
menus:
  - x: 10
    rows:
      - label: notes.txt
        close_after_open: true
      - label: Projects
        rows:
          - label: cascade
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.hotkey.as_deref(), Some("Ctrl+Alt+M"));
        let menu = &config.menus[0];
        assert_eq!(menu.x, 10);
        assert!(menu.rows[0].close_after_open);
        assert!(menu.rows[0].rows.is_none());
        assert_eq!(menu.rows[1].rows.as_ref().unwrap()[0].label, "cascade");
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(Config::from_yaml("menus: [").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "cascade-menu-config-test-{}.yaml",
            std::process::id()
        ));
        let mut config = Config::default();
        config.hotkey = Some("Ctrl+Alt+M".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_cli_config_is_an_error() {
        let result = get_config_path(Some("/definitely/not/here.yaml".to_string()));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("/definitely/not/here.yaml"));
    }

    #[test]
    fn test_existing_cli_config_wins() {
        let path = std::env::temp_dir().join(format!(
            "cascade-menu-cli-config-{}.yaml",
            std::process::id()
        ));
        Config::default().save(&path).unwrap();

        let found = get_config_path(Some(path.display().to_string())).unwrap();
        assert_eq!(found, path);
        let _ = fs::remove_file(&path);
    }
}
