//! Course record type

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::errors::{CatalogError, CatalogResult};

/// Documented domain of the average rating
pub const RATING_DOMAIN: RangeInclusive<f64> = 1.0..=5.0;

/// Documented domain of the average difficulty
pub const DIFFICULTY_DOMAIN: RangeInclusive<f64> = 1.0..=5.0;

/// Documented domain of the average weekly workload
pub const WORKLOAD_DOMAIN: RangeInclusive<f64> = 1.0..=100.0;

/// One catalog entry with aggregate review statistics.
///
/// Numeric aggregates are `None` when the course has no reviews yet. Absence
/// is a distinct state and is never treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Stable identifier, unique within a catalog
    pub id: String,

    /// Display name
    pub name: String,

    /// Average rating in 1..=5
    #[serde(default)]
    pub rating: Option<f64>,

    /// Average difficulty in 1..=5
    #[serde(default)]
    pub difficulty: Option<f64>,

    /// Average weekly workload in 1..=100
    #[serde(default)]
    pub workload: Option<f64>,

    /// Number of reviews the aggregates were computed from
    #[serde(default)]
    pub review_count: u32,

    /// Course is no longer offered
    #[serde(default)]
    pub is_deprecated: bool,

    /// Course is part of the foundational track
    #[serde(default)]
    pub is_foundational: bool,
}

impl Course {
    /// Create a course with no reviews
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: None,
            difficulty: None,
            workload: None,
            review_count: 0,
            is_deprecated: false,
            is_foundational: false,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_workload(mut self, workload: f64) -> Self {
        self.workload = Some(workload);
        self
    }

    pub fn with_review_count(mut self, count: u32) -> Self {
        self.review_count = count;
        self
    }

    /// Mark the course as deprecated
    pub fn deprecated(mut self) -> Self {
        self.is_deprecated = true;
        self
    }

    /// Mark the course as foundational
    pub fn foundational(mut self) -> Self {
        self.is_foundational = true;
        self
    }

    /// Check that every present aggregate is finite and inside its domain
    pub fn validate(&self) -> CatalogResult<()> {
        let checks = [
            ("rating", self.rating, &RATING_DOMAIN),
            ("difficulty", self.difficulty, &DIFFICULTY_DOMAIN),
            ("workload", self.workload, &WORKLOAD_DOMAIN),
        ];

        for (attribute, value, domain) in checks {
            if let Some(value) = value {
                if !value.is_finite() || !domain.contains(&value) {
                    return Err(CatalogError::OutOfDomain {
                        id: self.id.clone(),
                        attribute,
                        value,
                        min: *domain.start(),
                        max: *domain.end(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Validate a whole catalog snapshot: unique ids and in-domain aggregates
pub fn validate_catalog(courses: &[Course]) -> CatalogResult<()> {
    let mut seen = HashSet::with_capacity(courses.len());
    for course in courses {
        if !seen.insert(course.id.as_str()) {
            return Err(CatalogError::DuplicateId(course.id.clone()));
        }
        course.validate()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "cs-101",
            "name": "Intro to Computing",
            "rating": 4.5,
            "difficulty": null,
            "reviewCount": 12,
            "isFoundational": true
        }"#;

        let course: Course = serde_json::from_str(json).unwrap();
        assert_eq!(course.id, "cs-101");
        assert_eq!(course.rating, Some(4.5));
        assert_eq!(course.difficulty, None);
        assert_eq!(course.workload, None);
        assert_eq!(course.review_count, 12);
        assert!(course.is_foundational);
        assert!(!course.is_deprecated);
    }

    #[test]
    fn test_missing_review_count_defaults_to_zero() {
        let course: Course = serde_json::from_str(r#"{"id": "a", "name": "A"}"#).unwrap();
        assert_eq!(course.review_count, 0);
        assert_eq!(course.rating, None);
    }

    #[test]
    fn test_validate_rejects_out_of_domain_rating() {
        let course = Course::new("a", "A").with_rating(5.5);
        let err = course.validate().unwrap_err();
        assert!(matches!(err, CatalogError::OutOfDomain { attribute: "rating", .. }));
    }

    #[test]
    fn test_validate_rejects_nan_workload() {
        let course = Course::new("a", "A").with_workload(f64::NAN);
        assert!(course.validate().is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicate_ids() {
        let courses = vec![
            Course::new("a", "First"),
            Course::new("b", "Second"),
            Course::new("a", "Third"),
        ];
        match validate_catalog(&courses) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "a"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_catalog_accepts_absent_aggregates() {
        let courses = vec![
            Course::new("a", "A"),
            Course::new("b", "B").with_rating(1.0).with_workload(100.0),
        ];
        assert!(validate_catalog(&courses).is_ok());
    }
}
