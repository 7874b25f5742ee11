//! Count results and the record shape downstream consumers read.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ZoneCountError;
use crate::ir::{BBoxXYXY, ClassRegistry, Pixel};

/// Per-class counts, one entry per registry class, in registry order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinCounts {
    entries: Vec<(String, usize)>,
}

impl BinCounts {
    /// Creates a zero count for every class in `registry`.
    pub fn zeroed(registry: &ClassRegistry) -> Self {
        Self {
            entries: registry.iter().map(|label| (label.to_string(), 0)).collect(),
        }
    }

    /// Adds one to the count of `class_id`.
    ///
    /// # Errors
    /// Returns [`ZoneCountError::InvalidClassIndex`] if `class_id` has no entry.
    pub(crate) fn increment(&mut self, class_id: usize) -> Result<(), ZoneCountError> {
        let class_count = self.entries.len();
        let (_, count) = self
            .entries
            .get_mut(class_id)
            .ok_or(ZoneCountError::InvalidClassIndex {
                class_id: class_id as f64,
                class_count,
            })?;
        *count += 1;
        Ok(())
    }

    /// Returns the count for `label`, or `None` for an unknown label.
    pub fn get(&self, label: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for BinCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Summary of one image: how many objects of each class sit in the zone.
///
/// Serializes to the flat record
/// `{total_bins_in_zone, detected_bins_in_zone, found_bins_in_zone, missing_bins_in_zone}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PipelineResult {
    #[serde(rename = "total_bins_in_zone")]
    pub total_count: usize,

    #[serde(rename = "detected_bins_in_zone")]
    pub counts_by_class: BinCounts,

    /// Classes with a non-zero count, in registry order.
    #[serde(rename = "found_bins_in_zone")]
    pub found_classes: Vec<String>,

    /// Classes with a zero count, in registry order.
    #[serde(rename = "missing_bins_in_zone")]
    pub missing_classes: Vec<String>,
}

impl PipelineResult {
    /// Derives the total and the found/missing partition from `counts`.
    pub fn from_counts(counts: BinCounts) -> Self {
        let mut found_classes = Vec::new();
        let mut missing_classes = Vec::new();
        for (label, count) in counts.iter() {
            if count > 0 {
                found_classes.push(label.to_string());
            } else {
                missing_classes.push(label.to_string());
            }
        }

        Self {
            total_count: counts.total(),
            counts_by_class: counts,
            found_classes,
            missing_classes,
        }
    }
}

impl fmt::Display for PipelineResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total in zone: {}", self.total_count)?;
        for (label, count) in self.counts_by_class.iter() {
            writeln!(f, "  {}: {}", label, count)?;
        }
        writeln!(f, "Found: {}", join_or_none(&self.found_classes))?;
        writeln!(f, "Missing: {}", join_or_none(&self.missing_classes))
    }
}

fn join_or_none(labels: &[String]) -> String {
    if labels.is_empty() {
        "(none)".to_string()
    } else {
        labels.join(", ")
    }
}

/// A detection that passed every filter, ready to be drawn by the caller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnnotatedDetection {
    pub label: String,
    pub class_id: usize,
    pub score: f64,
    pub bbox: BBoxXYXY<Pixel>,
}

impl fmt::Display for AnnotatedDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2} at {}", self.label, self.score, self.bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, usize)]) -> BinCounts {
        BinCounts {
            entries: pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect(),
        }
    }

    #[test]
    fn test_zeroed_covers_registry() {
        let registry = ClassRegistry::new(["a", "b"]);
        let zeroed = BinCounts::zeroed(&registry);
        assert_eq!(zeroed.iter().collect::<Vec<_>>(), vec![("a", 0), ("b", 0)]);
        assert_eq!(zeroed.total(), 0);
    }

    #[test]
    fn test_increment_out_of_range() {
        let mut c = counts(&[("a", 0)]);
        c.increment(0).unwrap();
        let err = c.increment(1).unwrap_err();
        assert!(matches!(
            err,
            ZoneCountError::InvalidClassIndex { class_count: 1, .. }
        ));
        assert_eq!(c.get("a"), Some(1));
        assert_eq!(c.get("zzz"), None);
    }

    #[test]
    fn test_from_counts_partitions_in_registry_order() {
        let result = PipelineResult::from_counts(counts(&[("c", 2), ("a", 0), ("b", 1)]));
        assert_eq!(result.total_count, 3);
        assert_eq!(result.found_classes, vec!["c", "b"]);
        assert_eq!(result.missing_classes, vec!["a"]);
    }

    #[test]
    fn test_serialized_record_shape() {
        let result = PipelineResult::from_counts(counts(&[("garbage bin", 1), ("crate", 0)]));
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"total_bins_in_zone":1,"#,
                r#""detected_bins_in_zone":{"garbage bin":1,"crate":0},"#,
                r#""found_bins_in_zone":["garbage bin"],"#,
                r#""missing_bins_in_zone":["crate"]}"#
            )
        );
    }

    #[test]
    fn test_display() {
        let result = PipelineResult::from_counts(counts(&[("bin", 0)]));
        let text = result.to_string();
        assert!(text.contains("Total in zone: 0"));
        assert!(text.contains("Found: (none)"));
        assert!(text.contains("Missing: bin"));
    }
}
