//! Course catalog for rollcall
//!
//! The catalog is the fixed list of courses the school offers for
//! enrollment. Enrollment forms iterate it in declaration order, so the
//! order of entries is meaningful and preserved end to end.

use crate::error::{Result, RollcallError};
use serde::{Deserialize, Serialize};

/// A single offered course: a short code plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, e.g. "CS101"
    pub code: String,
    /// Course display name, e.g. "Introduction to Programming"
    pub name: String,
}

impl Course {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Ordered list of offered courses.
///
/// Serializes as a plain YAML/JSON sequence so the config file can list
/// courses directly under the `catalog:` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    /// Builds a catalog from an explicit course list.
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// Iterates courses in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Looks up a course by its code.
    pub fn get(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    /// Returns true if the catalog offers a course with this code.
    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Validate the catalog
    ///
    /// # Errors
    ///
    /// Returns error if the catalog is empty, a course has a blank code
    /// or name, or two courses share a code.
    pub fn validate(&self) -> Result<()> {
        if self.courses.is_empty() {
            return Err(RollcallError::Config("catalog cannot be empty".to_string()).into());
        }

        let mut seen = std::collections::HashSet::new();
        for course in &self.courses {
            if course.code.is_empty() {
                return Err(RollcallError::Config(
                    "catalog entries must have a non-empty code".to_string(),
                )
                .into());
            }
            if course.name.is_empty() {
                return Err(RollcallError::Config(format!(
                    "catalog entry {} must have a non-empty name",
                    course.code
                ))
                .into());
            }
            if !seen.insert(course.code.as_str()) {
                return Err(RollcallError::Config(format!(
                    "duplicate catalog code: {}",
                    course.code
                ))
                .into());
            }
        }

        Ok(())
    }
}

impl Default for Catalog {
    /// The stock offering used when the config file does not override it.
    fn default() -> Self {
        Self::new(vec![
            Course::new("CS101", "Introduction to Programming"),
            Course::new("MT102", "Mathematics"),
            Course::new("PH201", "Physics"),
            Course::new("CS202", "Data Structures"),
            Course::new("EN101", "English Literature"),
            Course::new("CH101", "Chemistry"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_contents() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 6);

        let codes: Vec<&str> = catalog.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(
            codes,
            vec!["CS101", "MT102", "PH201", "CS202", "EN101", "CH101"]
        );
        assert_eq!(
            catalog.get("CS101").unwrap().name,
            "Introduction to Programming"
        );
    }

    #[test]
    fn test_default_catalog_validates() {
        assert!(Catalog::default().validate().is_ok());
    }

    #[test]
    fn test_lookup_by_code() {
        let catalog = Catalog::default();
        assert!(catalog.contains("PH201"));
        assert!(!catalog.contains("XX999"));
        assert_eq!(catalog.get("EN101").unwrap().name, "English Literature");
        assert!(catalog.get("XX999").is_none());
    }

    #[test]
    fn test_validate_rejects_empty_catalog() {
        let catalog = Catalog::new(vec![]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_codes() {
        let catalog = Catalog::new(vec![
            Course::new("CS101", "Introduction to Programming"),
            Course::new("CS101", "Intro again"),
        ]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let catalog = Catalog::new(vec![Course::new("", "Nameless")]);
        assert!(catalog.validate().is_err());

        let catalog = Catalog::new(vec![Course::new("CS101", "")]);
        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_serializes_as_plain_sequence() {
        let catalog = Catalog::new(vec![Course::new("CS101", "Introduction to Programming")]);
        let yaml = serde_yaml::to_string(&catalog).unwrap();
        assert!(yaml.contains("- code: CS101"));

        let parsed: Catalog = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, catalog);
    }
}
