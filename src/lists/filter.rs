//! Range and toggle filters over course aggregates.
//!
//! A [`RangeFilter`] admits a value inside an inclusive `[min, max]` range and
//! always admits an absent value: a course without reviews has no rating that
//! could violate a rating bound. [`FilterCriteria`] holds the bounds the user
//! entered per attribute, and [`admit`] combines them with the two toggles.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{Course, DIFFICULTY_DOMAIN, RATING_DOMAIN, WORKLOAD_DOMAIN};

/// Numeric attributes that can be range filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FilterAttribute {
    ReviewCount,
    Rating,
    Difficulty,
    Workload,
}

impl FilterAttribute {
    pub const ALL: [FilterAttribute; 4] = [
        FilterAttribute::ReviewCount,
        FilterAttribute::Rating,
        FilterAttribute::Difficulty,
        FilterAttribute::Workload,
    ];

    /// Default bounds used when the user has not entered one
    pub fn domain(self) -> RangeFilter {
        match self {
            FilterAttribute::ReviewCount => RangeFilter::new(0.0, f64::INFINITY),
            FilterAttribute::Rating => RangeFilter::from_domain(&RATING_DOMAIN),
            FilterAttribute::Difficulty => RangeFilter::from_domain(&DIFFICULTY_DOMAIN),
            FilterAttribute::Workload => RangeFilter::from_domain(&WORKLOAD_DOMAIN),
        }
    }

    /// Read this attribute from a course
    pub fn value(self, course: &Course) -> Option<f64> {
        match self {
            FilterAttribute::ReviewCount => Some(f64::from(course.review_count)),
            FilterAttribute::Rating => course.rating,
            FilterAttribute::Difficulty => course.difficulty,
            FilterAttribute::Workload => course.workload,
        }
    }
}

impl fmt::Display for FilterAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterAttribute::ReviewCount => "reviewCount",
            FilterAttribute::Rating => "rating",
            FilterAttribute::Difficulty => "difficulty",
            FilterAttribute::Workload => "workload",
        };
        f.write_str(name)
    }
}

/// Which end of a range a bound applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BoundSide {
    Min,
    Max,
}

/// Boolean filter toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FilterToggle {
    HideDeprecated,
    OnlyShowFoundational,
}

/// Inclusive numeric range with null passthrough
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter {
    pub min: f64,
    pub max: f64,
}

impl RangeFilter {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn from_domain(domain: &std::ops::RangeInclusive<f64>) -> Self {
        Self::new(*domain.start(), *domain.end())
    }

    /// Absent values always pass; present values pass iff inside the range
    pub fn passes(&self, value: Option<f64>) -> bool {
        match value {
            None => true,
            Some(value) => self.min <= value && value <= self.max,
        }
    }
}

/// Optional user-entered bounds for one attribute
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Bounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bounds {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    fn side_mut(&mut self, side: BoundSide) -> &mut Option<f64> {
        match side {
            BoundSide::Min => &mut self.min,
            BoundSide::Max => &mut self.max,
        }
    }
}

/// Parse a bound typed by the user.
///
/// Empty, unparsable and non-finite input all mean "no bound".
pub fn parse_bound(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Active admit/reject constraints of the view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub review_count: Bounds,
    #[serde(default)]
    pub rating: Bounds,
    #[serde(default)]
    pub difficulty: Bounds,
    #[serde(default)]
    pub workload: Bounds,
    #[serde(default)]
    pub hide_deprecated: bool,
    #[serde(default)]
    pub only_show_foundational: bool,
}

impl FilterCriteria {
    pub fn bounds(&self, attribute: FilterAttribute) -> &Bounds {
        match attribute {
            FilterAttribute::ReviewCount => &self.review_count,
            FilterAttribute::Rating => &self.rating,
            FilterAttribute::Difficulty => &self.difficulty,
            FilterAttribute::Workload => &self.workload,
        }
    }

    pub fn bounds_mut(&mut self, attribute: FilterAttribute) -> &mut Bounds {
        match attribute {
            FilterAttribute::ReviewCount => &mut self.review_count,
            FilterAttribute::Rating => &mut self.rating,
            FilterAttribute::Difficulty => &mut self.difficulty,
            FilterAttribute::Workload => &mut self.workload,
        }
    }

    /// Store a bound from raw user input. Returns whether the criteria changed.
    pub fn set_bound(&mut self, attribute: FilterAttribute, side: BoundSide, input: &str) -> bool {
        let parsed = parse_bound(input);
        let slot = self.bounds_mut(attribute).side_mut(side);
        if *slot == parsed {
            return false;
        }
        *slot = parsed;
        true
    }

    /// Flip one of the boolean toggles
    pub fn toggle(&mut self, toggle: FilterToggle) {
        match toggle {
            FilterToggle::HideDeprecated => self.hide_deprecated = !self.hide_deprecated,
            FilterToggle::OnlyShowFoundational => {
                self.only_show_foundational = !self.only_show_foundational
            }
        }
    }

    /// Bounds to evaluate, with absent user bounds replaced by the domain default
    pub fn effective_range(&self, attribute: FilterAttribute) -> RangeFilter {
        let domain = attribute.domain();
        let bounds = self.bounds(attribute);
        RangeFilter::new(
            bounds.min.unwrap_or(domain.min),
            bounds.max.unwrap_or(domain.max),
        )
    }

    /// Whether any constraint differs from the defaults
    pub fn is_active(&self) -> bool {
        self.hide_deprecated
            || self.only_show_foundational
            || FilterAttribute::ALL
                .iter()
                .any(|attribute| !self.bounds(*attribute).is_empty())
    }
}

/// Decide whether a course belongs in the filtered result
pub fn admit(course: &Course, criteria: &FilterCriteria) -> bool {
    let in_range = FilterAttribute::ALL.iter().all(|attribute| {
        criteria
            .effective_range(*attribute)
            .passes(attribute.value(course))
    });

    let deprecated_ok = !(criteria.hide_deprecated && course.is_deprecated);
    let foundational_ok = !criteria.only_show_foundational || course.is_foundational;

    in_range && deprecated_ok && foundational_ok
}
