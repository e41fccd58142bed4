//! Widget configuration
//!
//! Footprint sizes are fixed pixel constants rather than measured from the
//! rendered element, so clamping gives the same result on every host.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};
use crate::position::{Point, Size};

/// Default top-left corner of a freshly opened widget
pub const DEFAULT_POSITION: Point = Point::new(24.0, 24.0);

/// Clamping footprint of the expanded calculator card
pub const EXPANDED_FOOTPRINT: Size = Size::new(320.0, 400.0);

/// Clamping footprint of the minimized badge
pub const MINIMIZED_FOOTPRINT: Size = Size::new(60.0, 60.0);

/// Placement configuration of a widget instance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    /// Top-left corner when the widget opens
    pub initial_position: Point,
    /// Footprint of the expanded card
    pub expanded: Size,
    /// Footprint of the minimized badge
    pub minimized: Size,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            initial_position: DEFAULT_POSITION,
            expanded: EXPANDED_FOOTPRINT,
            minimized: MINIMIZED_FOOTPRINT,
        }
    }
}

impl WidgetConfig {
    /// Create a new builder
    #[must_use]
    pub fn builder() -> WidgetConfigBuilder {
        WidgetConfigBuilder::default()
    }

    /// Parses and validates a JSON document
    pub fn from_json_str(text: &str) -> WidgetResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a YAML document
    pub fn from_yaml_str(text: &str) -> WidgetResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, JSON for `.json` and YAML otherwise
    pub fn load(path: &Path) -> WidgetResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// Serializes to pretty JSON
    pub fn to_json(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> WidgetResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Checks that every size and coordinate is finite and non-negative
    pub fn validate(&self) -> WidgetResult<()> {
        let fields = [
            ("initial_position.x", self.initial_position.x),
            ("initial_position.y", self.initial_position.y),
            ("expanded.width", self.expanded.width),
            ("expanded.height", self.expanded.height),
            ("minimized.width", self.minimized.width),
            ("minimized.height", self.minimized.height),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(WidgetError::invalid_config(field, "must be finite"));
            }
            if value < 0.0 {
                return Err(WidgetError::invalid_config(
                    field,
                    format!("must not be negative (got {value})"),
                ));
            }
        }
        Ok(())
    }
}

/// Builder for `WidgetConfig`
#[derive(Debug, Clone, Default)]
pub struct WidgetConfigBuilder {
    config: WidgetConfig,
}

impl WidgetConfigBuilder {
    /// Set the opening position
    #[must_use]
    pub fn initial_position(mut self, x: f64, y: f64) -> Self {
        self.config.initial_position = Point::new(x, y);
        self
    }

    /// Set the expanded footprint
    #[must_use]
    pub fn expanded(mut self, width: f64, height: f64) -> Self {
        self.config.expanded = Size::new(width, height);
        self
    }

    /// Set the minimized footprint
    #[must_use]
    pub fn minimized(mut self, width: f64, height: f64) -> Self {
        self.config.minimized = Size::new(width, height);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> WidgetResult<WidgetConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::default();
        assert_eq!(config.initial_position, Point::new(24.0, 24.0));
        assert_eq!(config.expanded, Size::new(320.0, 400.0));
        assert_eq!(config.minimized, Size::new(60.0, 60.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = WidgetConfig::builder()
            .initial_position(10.0, 12.0)
            .expanded(300.0, 420.0)
            .minimized(48.0, 48.0)
            .build()
            .unwrap();
        assert_eq!(config.initial_position, Point::new(10.0, 12.0));
        assert_eq!(config.expanded, Size::new(300.0, 420.0));
        assert_eq!(config.minimized, Size::new(48.0, 48.0));
    }

    #[test]
    fn test_builder_rejects_negative() {
        let err = WidgetConfig::builder().expanded(-1.0, 400.0).build().unwrap_err();
        assert!(matches!(
            err,
            WidgetError::InvalidConfig {
                field: "expanded.width",
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let config = WidgetConfig {
            minimized: Size::new(f64::NAN, 60.0),
            ..WidgetConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_partial_uses_defaults() {
        let config =
            WidgetConfig::from_json_str(r#"{"initial_position":{"x":100.0,"y":80.0}}"#).unwrap();
        assert_eq!(config.initial_position, Point::new(100.0, 80.0));
        assert_eq!(config.expanded, EXPANDED_FOOTPRINT);
    }

    #[test]
    fn test_yaml() {
        let yaml = "minimized:\n  width: 56\n  height: 56\n";
        let config = WidgetConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.minimized, Size::new(56.0, 56.0));
        assert_eq!(config.initial_position, DEFAULT_POSITION);
    }

    #[test]
    fn test_json_malformed() {
        let err = WidgetConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, WidgetError::ConfigJson(_)));
    }

    #[test]
    fn test_json_round_trip() {
        let config = WidgetConfig::builder().initial_position(5.0, 6.0).build().unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(WidgetConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("widget.json");
        let mut file = std::fs::File::create(&json_path).unwrap();
        writeln!(file, r#"{{"expanded":{{"width":280.0,"height":380.0}}}}"#).unwrap();
        assert_eq!(
            WidgetConfig::load(&json_path).unwrap().expanded,
            Size::new(280.0, 380.0)
        );

        let yaml_path = dir.path().join("widget.yaml");
        std::fs::write(&yaml_path, "initial_position:\n  x: 1\n  y: 2\n").unwrap();
        assert_eq!(
            WidgetConfig::load(&yaml_path).unwrap().initial_position,
            Point::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = WidgetConfig::load(Path::new("/nonexistent/widget.yaml")).unwrap_err();
        assert!(matches!(err, WidgetError::Io(_)));
    }
}
