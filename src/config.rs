//! Tab bar configuration.

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    selector::{SelectorOption, SpringConfig},
};

/// One configured tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    pub id: String,
    /// Falls back to `id` when absent.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub glyph: Option<String>,
    /// Activating this tab opens its panel as a modal instead of selecting it.
    #[serde(default)]
    pub overrides_selection: bool,
    /// The navigator refuses to select this tab.
    #[serde(default)]
    pub locked: bool,
}

impl TabConfig {
    fn new(id: &str, label: &str, glyph: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: Some(label.to_owned()),
            glyph: Some(glyph.to_owned()),
            overrides_selection: false,
            locked: false,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    #[must_use]
    pub fn to_option(&self) -> SelectorOption {
        let option = SelectorOption::new(&self.id).with_label(self.label());
        let option = match &self.glyph {
            Some(glyph) => option.with_glyph(glyph),
            None => option,
        };
        if self.overrides_selection {
            option.overriding()
        } else {
            option
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tabs: Vec<TabConfig>,
    /// Tab selected on start. Defaults to the first regular tab.
    pub initial: Option<String>,
    pub spring: SpringConfig,
    pub frame_interval_ms: u64,
    /// Delay before a requested selection becomes the active one.
    pub propagation_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: vec![
                TabConfig::new("listings", "Listele", "▦"),
                TabConfig::new("favorites", "Favoriler", "♡"),
                TabConfig {
                    overrides_selection: true,
                    ..TabConfig::new("create-listing", "İlan Ekle", "⊕")
                },
                TabConfig::new("chat-history", "Geçmiş Sohbetler", "✉"),
                TabConfig::new("profile", "Profil", "☺"),
            ],
            initial: None,
            spring: SpringConfig::default(),
            frame_interval_ms: 16,
            propagation_delay_ms: 0,
        }
    }
}

impl Config {
    /// `<config_dir>/pill-tabs/tabs.json`.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pill-tabs").join("tabs.json"))
    }

    /// Load from `path`, or from [`default_path`](Self::default_path) when
    /// `None`. A missing default file yields the built-in tabs.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::read(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_owned(),
            reason: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.tabs.is_empty() {
            return Err(ConfigError::NoTabs);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.tabs.iter().find(|t| !seen.insert(t.id.as_str())) {
            return Err(ConfigError::DuplicateTab(dup.id.clone()));
        }

        if let Some(initial) = &self.initial {
            let tab = self
                .tab(initial)
                .ok_or_else(|| ConfigError::UnknownInitial(initial.clone()))?;
            if tab.overrides_selection {
                return Err(ConfigError::InitialOverrides(initial.clone()));
            }
        }

        if self.spring.stiffness.is_nan() || self.spring.stiffness <= 0.0 {
            return Err(ConfigError::InvalidStiffness(self.spring.stiffness));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        Ok(())
    }

    #[must_use]
    pub fn tab(&self, id: &str) -> Option<&TabConfig> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// The tab active on start, if any tab can be active at all.
    #[must_use]
    pub fn initial_tab(&self) -> Option<&str> {
        self.initial.as_deref().or_else(|| {
            self.tabs
                .iter()
                .find(|t| !t.overrides_selection)
                .map(|t| t.id.as_str())
        })
    }

    #[must_use]
    pub fn options(&self) -> Vec<SelectorOption> {
        self.tabs.iter().map(TabConfig::to_option).collect()
    }

    #[must_use]
    pub const fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    #[must_use]
    pub const fn propagation_delay(&self) -> Duration {
        Duration::from_millis(self.propagation_delay_ms)
    }
}
