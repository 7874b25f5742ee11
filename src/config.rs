//! Layered counting settings.
//!
//! Precedence, lowest first: built-in defaults, an optional YAML or JSON
//! config file, then command-line flags and environment variables. The
//! merged settings are validated once, before any detections are read.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::ZoneCountError;
use crate::ir::{ClassRegistry, Zone};
use crate::pipeline::{PipelineConfig, DEFAULT_IOU_THRESHOLD, DEFAULT_SCORE_THRESHOLD};

pub const DEFAULT_CLASSES: &[&str] = &["garbage bin"];

/// On-disk form; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    iou_threshold: Option<f64>,
    score_threshold: Option<f64>,
    zone: Option<[f64; 4]>,
    classes: Option<Vec<String>>,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Default, Clone)]
pub struct SettingsOverrides {
    pub iou_threshold: Option<f64>,
    pub score_threshold: Option<f64>,
    pub zone: Option<Zone>,
    pub classes: Option<Vec<String>>,
}

/// Validated settings shared by every image of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct CountSettings {
    pub iou_threshold: f64,
    pub score_threshold: f64,
    pub zone: Zone,
    pub registry: ClassRegistry,
}

impl Default for CountSettings {
    fn default() -> Self {
        Self {
            iou_threshold: DEFAULT_IOU_THRESHOLD,
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            zone: Zone::default(),
            registry: ClassRegistry::new(DEFAULT_CLASSES.iter().copied()),
        }
    }
}

impl CountSettings {
    /// Merges defaults, the config file at `path` (if any) and `overrides`.
    pub fn load(path: Option<&Path>, overrides: SettingsOverrides) -> Result<Self, ZoneCountError> {
        let file = match path {
            Some(path) => read_settings_file(path)?,
            None => SettingsFile::default(),
        };

        let mut settings = Self::from_file(file)?;
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    fn from_file(file: SettingsFile) -> Result<Self, ZoneCountError> {
        let defaults = Self::default();
        let zone = match file.zone {
            Some(coords) => Zone::try_from(coords)?,
            None => defaults.zone,
        };

        Ok(Self {
            iou_threshold: file.iou_threshold.unwrap_or(defaults.iou_threshold),
            score_threshold: file.score_threshold.unwrap_or(defaults.score_threshold),
            zone,
            registry: file.classes.map(ClassRegistry::new).unwrap_or(defaults.registry),
        })
    }

    fn apply(&mut self, overrides: SettingsOverrides) {
        if let Some(v) = overrides.iou_threshold {
            self.iou_threshold = v;
        }
        if let Some(v) = overrides.score_threshold {
            self.score_threshold = v;
        }
        if let Some(zone) = overrides.zone {
            self.zone = zone;
        }
        if let Some(classes) = overrides.classes {
            self.registry = ClassRegistry::new(classes);
        }
    }

    /// Checks the cross-field rules the individual types cannot.
    pub fn validate(&self) -> Result<(), ZoneCountError> {
        if self.iou_threshold.is_nan() {
            return Err(ZoneCountError::InvalidOption(
                "iou threshold must be a number".into(),
            ));
        }
        if self.score_threshold.is_nan() {
            return Err(ZoneCountError::InvalidOption(
                "score threshold must be a number".into(),
            ));
        }
        if self.registry.is_empty() {
            return Err(ZoneCountError::InvalidOption(
                "at least one class label is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for label in self.registry.iter() {
            if label.trim().is_empty() {
                return Err(ZoneCountError::InvalidOption(
                    "class labels must not be empty".into(),
                ));
            }
            if !seen.insert(label) {
                return Err(ZoneCountError::InvalidOption(format!(
                    "duplicate class label '{}'",
                    label
                )));
            }
        }

        Ok(())
    }

    /// Binds the settings to one image.
    pub fn pipeline_config(&self, image_width: u32, image_height: u32) -> PipelineConfig {
        PipelineConfig {
            iou_threshold: self.iou_threshold,
            score_threshold: self.score_threshold,
            zone: self.zone,
            registry: self.registry.clone(),
            image_width,
            image_height,
        }
    }
}

/// Reads a settings file. YAML is a superset of JSON, so both are accepted.
fn read_settings_file(path: &Path) -> Result<SettingsFile, ZoneCountError> {
    let text = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&text).map_err(|source| ZoneCountError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("zonecount.yaml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let settings = CountSettings::load(None, SettingsOverrides::default()).unwrap();
        assert_eq!(settings.iou_threshold, 0.5);
        assert_eq!(settings.score_threshold, 0.5);
        assert_eq!(settings.zone, Zone::new(0.35, 0.2, 0.7, 0.6).unwrap());
        assert_eq!(settings.registry, ClassRegistry::new(["garbage bin"]));
    }

    #[test]
    fn test_file_values_apply() {
        let (_dir, path) = write_config(
            "iou_threshold: 0.3\nzone: [0.0, 0.0, 1.0, 1.0]\nclasses: [bin, crate]\n",
        );
        let settings = CountSettings::load(Some(&path), SettingsOverrides::default()).unwrap();
        assert_eq!(settings.iou_threshold, 0.3);
        assert_eq!(settings.score_threshold, 0.5);
        assert_eq!(settings.zone, Zone::full());
        assert_eq!(settings.registry, ClassRegistry::new(["bin", "crate"]));
    }

    #[test]
    fn test_json_config_is_accepted() {
        let (_dir, path) = write_config(r#"{"score_threshold": 0.25}"#);
        let settings = CountSettings::load(Some(&path), SettingsOverrides::default()).unwrap();
        assert_eq!(settings.score_threshold, 0.25);
    }

    #[test]
    fn test_overrides_beat_file() {
        let (_dir, path) = write_config("iou_threshold: 0.3\nclasses: [bin]\n");
        let overrides = SettingsOverrides {
            iou_threshold: Some(0.7),
            classes: Some(vec!["pallet".into()]),
            ..Default::default()
        };
        let settings = CountSettings::load(Some(&path), overrides).unwrap();
        assert_eq!(settings.iou_threshold, 0.7);
        assert_eq!(settings.registry, ClassRegistry::new(["pallet"]));
    }

    #[test]
    fn test_invalid_zone_in_file() {
        let (_dir, path) = write_config("zone: [0.7, 0.2, 0.35, 0.6]\n");
        let err = CountSettings::load(Some(&path), SettingsOverrides::default()).unwrap_err();
        assert!(matches!(err, ZoneCountError::InvalidZone { .. }));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let (_dir, path) = write_config("iou: 0.3\n");
        let err = CountSettings::load(Some(&path), SettingsOverrides::default()).unwrap_err();
        assert!(matches!(err, ZoneCountError::ConfigParse { .. }));
    }

    #[test]
    fn test_duplicate_and_empty_labels_are_rejected() {
        for classes in [vec!["bin", "bin"], vec!["bin", " "], vec![]] {
            let overrides = SettingsOverrides {
                classes: Some(classes.iter().map(|s| s.to_string()).collect()),
                ..Default::default()
            };
            let err = CountSettings::load(None, overrides).unwrap_err();
            assert!(matches!(err, ZoneCountError::InvalidOption(_)));
        }
    }

    #[test]
    fn test_nan_threshold_is_rejected() {
        let overrides = SettingsOverrides {
            score_threshold: Some(f64::NAN),
            ..Default::default()
        };
        assert!(CountSettings::load(None, overrides).is_err());
    }

    #[test]
    fn test_pipeline_config_binds_image_size() {
        let cfg = CountSettings::default().pipeline_config(640, 480);
        assert_eq!((cfg.image_width, cfg.image_height), (640, 480));
        assert_eq!(cfg.registry.len(), 1);
    }
}
