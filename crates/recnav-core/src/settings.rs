//! Serializable navigator settings

use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::navigation::{NavigatorConfig, DEFAULT_PAGE_SIZE};

/// Navigator settings as stored in a JSON settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Instance name, used in trigger ids
    pub name: String,

    /// Records per page
    pub page_size: usize,

    /// Whether records are listed first to last
    pub ascending: bool,

    /// Explicit labels for the first, previous, next and last controls
    pub labels: Option<[String; 4]>,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            name: "records".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            ascending: true,
            labels: None,
        }
    }
}

impl NavigatorSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&text)?;
        tracing::debug!(path = %path.as_ref().display(), ?settings, "Loaded navigator settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validated navigator configuration
    pub fn into_config(self) -> Result<NavigatorConfig> {
        let mut config = NavigatorConfig::new(self.name)
            .with_page_size(self.page_size)
            .with_ascending(self.ascending);
        if let Some(labels) = self.labels {
            config = config.with_labels(labels);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NavigatorError;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = NavigatorSettings::from_json(r#"{ "name": "names" }"#).unwrap();
        assert_eq!(settings.page_size, DEFAULT_PAGE_SIZE);
        assert!(settings.ascending);

        let config = settings.into_config().unwrap();
        assert_eq!(config.name(), "names");
        assert_eq!(config.labels(), ["first", "previous", "next", "last"]);
    }

    #[test]
    fn test_explicit_labels() {
        let json = r#"{ "page_size": 25, "ascending": false, "labels": ["a", "b", "c", "d"] }"#;
        let config = NavigatorSettings::from_json(json).unwrap().into_config().unwrap();
        assert_eq!(config.page_size(), 25);
        assert_eq!(config.labels(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_zero_page_size_is_an_error() {
        let settings = NavigatorSettings::from_json(r#"{ "page_size": 0 }"#).unwrap();
        assert!(matches!(settings.into_config(), Err(NavigatorError::InvalidPageSize(0))));
    }

    #[test]
    fn test_negative_page_size_fails_to_parse() {
        let result = NavigatorSettings::from_json(r#"{ "page_size": -5 }"#);
        assert!(matches!(result, Err(NavigatorError::Settings(_))));
    }

    #[test]
    fn test_round_trip_through_file() {
        let path = std::env::temp_dir()
            .join(format!("recnav-settings-{}.json", uuid::Uuid::new_v4()));
        let settings = NavigatorSettings {
            name: "names".to_string(),
            page_size: 15,
            ..Default::default()
        };
        std::fs::write(&path, settings.to_json().unwrap()).unwrap();

        let loaded = NavigatorSettings::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = NavigatorSettings::load("/definitely/not/here.json");
        assert!(matches!(result, Err(NavigatorError::Io(_))));
    }
}
