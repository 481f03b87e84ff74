//! Runtime configuration.
//!
//! [`MdiConfig`] is plain data handed to [`MdiHost::with_config`] and
//! [`MdiTabServer::with_config`]. It can be kept in a TOML file; keys missing
//! from the file take their defaults.
//!
//! ```toml
//! update_menus_and_toolbars = true
//! auto_hide_tab_bar = true
//! close_tab_on_middle_click = true
//! tool_bar_area = "top"
//!
//! [local_actions]
//! title = "Local actions"
//! close_this = "Close this window"
//! close_others = "Close other windows"
//! close_all = "Close all windows"
//! ```
//!
//! [`MdiHost::with_config`]: crate::mdi::MdiHost::with_config
//! [`MdiTabServer::with_config`]: crate::mdi::MdiTabServer::with_config

use std::fs;
use std::io::Write;
use std::path::Path;

use qmdi_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{MdiError, Result};
use crate::widget::widgets::ToolBarArea;

/// Labels of the per-tab context menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalActionLabels {
    pub title: String,
    pub close_this: String,
    pub close_others: String,
    pub close_all: String,
}

impl Default for LocalActionLabels {
    fn default() -> Self {
        Self {
            title: "Local actions".to_string(),
            close_this: "Close this window".to_string(),
            close_others: "Close other windows".to_string(),
            close_all: "Close all windows".to_string(),
        }
    }
}

/// Behavior switches for hosts and servers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdiConfig {
    /// When off, clients are not merged into the host's lists and nothing is
    /// realized. Merge hooks and shortcut registration still run.
    pub update_menus_and_toolbars: bool,
    /// Show the tab bar only while more than one tab is open.
    pub auto_hide_tab_bar: bool,
    /// Middle-clicking a tab tries to close its client.
    pub close_tab_on_middle_click: bool,
    /// Area newly created toolbars are docked into.
    pub tool_bar_area: ToolBarArea,
    pub local_actions: LocalActionLabels,
}

impl Default for MdiConfig {
    fn default() -> Self {
        Self {
            update_menus_and_toolbars: true,
            auto_hide_tab_bar: true,
            close_tab_on_middle_click: true,
            tool_bar_area: ToolBarArea::Top,
            local_actions: LocalActionLabels::default(),
        }
    }
}

impl MdiConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| MdiError::config(path, MdiError::io(path, e)))?;
        let config = Self::from_toml_str(&text).map_err(|e| MdiError::config(path, e))?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when it does not
    /// exist. Other failures are still reported.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(
                target: targets::CONFIG,
                path = %path.display(),
                "no configuration file, using defaults"
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Write this configuration to `path`.
    ///
    /// The file is written to a temporary sibling first and renamed into
    /// place, so readers never see a partial file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = self.to_toml_string()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(|e| MdiError::io(dir, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| MdiError::io(file.path(), e))?;
        file.persist(path)
            .map_err(|e| MdiError::io(path, e.error))?;

        tracing::debug!(target: targets::CONFIG, path = %path.display(), "saved configuration");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MdiConfig::default();
        assert!(config.update_menus_and_toolbars);
        assert!(config.auto_hide_tab_bar);
        assert_eq!(config.tool_bar_area, ToolBarArea::Top);
        assert_eq!(config.local_actions.close_all, "Close all windows");
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config = MdiConfig::from_toml_str(
            r#"
            auto_hide_tab_bar = false
            tool_bar_area = "left"

            [local_actions]
            title = "Tab"
            "#,
        )
        .unwrap();
        assert!(!config.auto_hide_tab_bar);
        assert!(config.close_tab_on_middle_click);
        assert_eq!(config.tool_bar_area, ToolBarArea::Left);
        assert_eq!(config.local_actions.title, "Tab");
        assert_eq!(config.local_actions.close_this, "Close this window");
    }

    #[test]
    fn test_invalid_toml() {
        let err = MdiConfig::from_toml_str("tool_bar_area = \"middle\"").unwrap_err();
        assert!(matches!(err, MdiError::ConfigParse(_)));
    }

    #[test]
    fn test_string_round_trip() {
        let mut config = MdiConfig::default();
        config.update_menus_and_toolbars = false;
        config.tool_bar_area = ToolBarArea::Bottom;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("tool_bar_area = \"bottom\""));
        assert_eq!(MdiConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qmdi.toml");

        let mut config = MdiConfig::default();
        config.close_tab_on_middle_click = false;
        config.save(&path).unwrap();

        assert_eq!(MdiConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = MdiConfig::load(&path).unwrap_err();
        assert!(matches!(err, MdiError::Config { .. }));
        assert_eq!(MdiConfig::load_or_default(&path).unwrap(), MdiConfig::default());
    }
}
