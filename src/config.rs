//! TOML-based dashboard configuration.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::Country;

/// Top-level dashboard configuration parsed from TOML.
///
/// All fields have defaults matching the stock dashboard. Load from
/// TOML with [`DashboardConfig::from_toml_file`] or use
/// [`DashboardConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Data directory location.
    #[serde(default)]
    pub data: DataConfig,
    /// Chart display parameters.
    #[serde(default)]
    pub charts: ChartsConfig,
    /// Frontend defaults.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Data directory location.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory holding the per-country CSV files.
    pub dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

/// Chart display parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartsConfig {
    /// Rows shown in the data preview (must be > 0).
    pub preview_rows: usize,
    /// Bin count for the GHI histogram (must be > 0).
    pub ghi_bins: usize,
    /// Bin count for the wind speed histogram (must be > 0).
    pub ws_bins: usize,
    /// Color map name passed to the heatmap renderer.
    pub heatmap_color_map: String,
    /// Whether heatmap cells carry numeric annotations.
    pub heatmap_annotate: bool,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            preview_rows: 50,
            ghi_bins: 50,
            ws_bins: 30,
            heatmap_color_map: "coolwarm".to_string(),
            heatmap_annotate: true,
        }
    }
}

/// Frontend defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Country selected at startup (one of the three selector labels).
    pub default_country: String,
    /// Whether the correlation heatmap starts enabled.
    pub show_heatmap: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_country: "Benin".to_string(),
            show_heatmap: false,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"charts.ghi_bins"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {} — {}", self.field, self.message)
    }
}

impl DashboardConfig {
    /// Returns the baseline configuration (the stock dashboard parameters).
    pub fn baseline() -> Self {
        Self {
            data: DataConfig::default(),
            charts: ChartsConfig::default(),
            ui: UiConfig::default(),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.data.dir.is_empty() {
            errors.push(ConfigError {
                field: "data.dir".into(),
                message: "must not be empty".into(),
            });
        }

        let c = &self.charts;
        if c.preview_rows == 0 {
            errors.push(ConfigError {
                field: "charts.preview_rows".into(),
                message: "must be > 0".into(),
            });
        }
        if c.ghi_bins == 0 {
            errors.push(ConfigError {
                field: "charts.ghi_bins".into(),
                message: "must be > 0".into(),
            });
        }
        if c.ws_bins == 0 {
            errors.push(ConfigError {
                field: "charts.ws_bins".into(),
                message: "must be > 0".into(),
            });
        }

        if Country::from_label(&self.ui.default_country).is_err() {
            errors.push(ConfigError {
                field: "ui.default_country".into(),
                message: format!(
                    "must be one of Benin, Sierra Leone, Togo, got \"{}\"",
                    self.ui.default_country
                ),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_is_valid() {
        let cfg = DashboardConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn baseline_mirrors_stock_defaults() {
        let cfg = DashboardConfig::baseline();
        assert_eq!(cfg.charts.preview_rows, 50);
        assert_eq!(cfg.charts.ghi_bins, 50);
        assert_eq!(cfg.charts.ws_bins, 30);
        assert_eq!(cfg.charts.heatmap_color_map, "coolwarm");
        assert!(cfg.charts.heatmap_annotate);
        assert!(!cfg.ui.show_heatmap);
        assert_eq!(cfg.data.dir, "data");
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[data]
dir = "fixtures"

[charts]
preview_rows = 20
ghi_bins = 40
ws_bins = 15
heatmap_color_map = "viridis"
heatmap_annotate = false

[ui]
default_country = "Togo"
show_heatmap = true
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| &*c.data.dir), Some("fixtures"));
        assert_eq!(cfg.as_ref().map(|c| c.charts.preview_rows), Some(20));
        assert_eq!(cfg.as_ref().map(|c| &*c.ui.default_country), Some("Togo"));
        assert_eq!(cfg.as_ref().map(|c| c.ui.show_heatmap), Some(true));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[charts]
preview_rows = 50
bogus_field = true
"#;
        let result = DashboardConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[ui]
default_country = "Sierra Leone"
"#;
        let cfg = DashboardConfig::from_toml_str(toml);
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        // default_country overridden
        assert_eq!(
            cfg.as_ref().map(|c| &*c.ui.default_country),
            Some("Sierra Leone")
        );
        // charts kept default
        assert_eq!(cfg.as_ref().map(|c| c.charts.ghi_bins), Some(50));
        assert_eq!(cfg.as_ref().map(|c| &*c.data.dir), Some("data"));
    }

    #[test]
    fn validation_catches_zero_bins() {
        let mut cfg = DashboardConfig::baseline();
        cfg.charts.ghi_bins = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "charts.ghi_bins"));
    }

    #[test]
    fn validation_catches_zero_preview_rows() {
        let mut cfg = DashboardConfig::baseline();
        cfg.charts.preview_rows = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "charts.preview_rows"));
    }

    #[test]
    fn validation_catches_unknown_default_country() {
        let mut cfg = DashboardConfig::baseline();
        cfg.ui.default_country = "Atlantis".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "ui.default_country"));
    }

    #[test]
    fn validation_accepts_all_selector_labels() {
        for label in ["Benin", "Sierra Leone", "Togo"] {
            let mut cfg = DashboardConfig::baseline();
            cfg.ui.default_country = label.to_string();
            let errors = cfg.validate();
            assert!(errors.is_empty(), "label \"{label}\" should be valid");
        }
    }
}
