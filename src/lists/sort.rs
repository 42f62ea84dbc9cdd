//! Sort configuration and the course comparator.
//!
//! Numeric attributes use a null-last policy: a course missing the attribute
//! ranks after every course that has it, in both directions. Descending order
//! only negates the comparison of two present values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::collation::locale_compare;
use crate::catalog::Course;

/// Attribute the list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortAttribute {
    Name,
    Rating,
    Difficulty,
    Workload,
    ReviewCount,
}

impl SortAttribute {
    pub const ALL: [SortAttribute; 5] = [
        SortAttribute::Name,
        SortAttribute::Rating,
        SortAttribute::Difficulty,
        SortAttribute::Workload,
        SortAttribute::ReviewCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortAttribute::Name => "name",
            SortAttribute::Rating => "rating",
            SortAttribute::Difficulty => "difficulty",
            SortAttribute::Workload => "workload",
            SortAttribute::ReviewCount => "reviewCount",
        }
    }

    fn numeric_value(self, course: &Course) -> Option<f64> {
        match self {
            SortAttribute::Name => None,
            SortAttribute::Rating => course.rating,
            SortAttribute::Difficulty => course.difficulty,
            SortAttribute::Workload => course.workload,
            SortAttribute::ReviewCount => Some(f64::from(course.review_count)),
        }
    }
}

impl fmt::Display for SortAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown sort attribute '{0}' (expected one of: name, rating, difficulty, workload, reviewCount)")]
pub struct ParseSortAttributeError(String);

impl FromStr for SortAttribute {
    type Err = ParseSortAttributeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortAttribute::Name),
            "rating" => Ok(SortAttribute::Rating),
            "difficulty" => Ok(SortAttribute::Difficulty),
            "workload" => Ok(SortAttribute::Workload),
            "reviewcount" | "review-count" | "review_count" | "reviews" => {
                Ok(SortAttribute::ReviewCount)
            }
            _ => Err(ParseSortAttributeError(s.to_string())),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// Attribute and direction defining the current order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SortConfig {
    pub attribute: SortAttribute,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            attribute: SortAttribute::ReviewCount,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(attribute: SortAttribute, direction: SortDirection) -> Self {
        Self { attribute, direction }
    }

    /// Apply a click on a column header: the current column flips direction,
    /// any other column becomes the key in ascending order.
    pub fn select(&mut self, attribute: SortAttribute) {
        if self.attribute == attribute {
            self.direction = self.direction.reversed();
        } else {
            self.attribute = attribute;
            self.direction = SortDirection::Asc;
        }
    }
}

/// Compare two courses under a sort configuration
pub fn compare(a: &Course, b: &Course, config: &SortConfig) -> Ordering {
    match config.attribute {
        SortAttribute::Name => {
            let ordering = locale_compare(&a.name, &b.name);
            match config.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
        attribute => compare_nulls_last(
            attribute.numeric_value(a),
            attribute.numeric_value(b),
            config.direction,
        ),
    }
}

fn compare_nulls_last(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Stable sort of indices into `courses`
pub fn sort_indices(order: &mut [usize], courses: &[Course], config: &SortConfig) {
    order.sort_by(|a, b| compare(&courses[*a], &courses[*b], config));
}
