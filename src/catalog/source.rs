//! Sources that materialize a catalog snapshot

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::errors::{CatalogError, CatalogResult};
use super::types::{validate_catalog, Course};

/// Trait for anything that can produce the course collection once per view
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Fetch the full course collection
    async fn fetch(&self) -> CatalogResult<Vec<Course>>;

    /// Human readable description used in logs
    fn describe(&self) -> String;
}

/// Catalog stored as a JSON or YAML array on disk
#[derive(Debug, Clone)]
pub struct FileCourseSource {
    path: PathBuf,
}

impl FileCourseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_yaml(&self) -> bool {
        matches!(
            self.path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        )
    }
}

#[async_trait]
impl CourseSource for FileCourseSource {
    async fn fetch(&self) -> CatalogResult<Vec<Course>> {
        debug!("Reading catalog from: {}", self.path.display());

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::IoError {
                path: self.path.clone(),
                source,
            })?;

        let courses: Vec<Course> = if self.is_yaml() {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        validate_catalog(&courses)?;
        Ok(courses)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Catalog already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticCourseSource {
    courses: Vec<Course>,
}

impl StaticCourseSource {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }
}

#[async_trait]
impl CourseSource for StaticCourseSource {
    async fn fetch(&self) -> CatalogResult<Vec<Course>> {
        validate_catalog(&self.courses)?;
        Ok(self.courses.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory courses", self.courses.len())
    }
}

/// Fetch the catalog, treating any failure as an empty collection
pub async fn load_or_empty(source: &dyn CourseSource) -> Vec<Course> {
    match source.fetch().await {
        Ok(courses) => {
            info!("Loaded {} courses from {}", courses.len(), source.describe());
            courses
        }
        Err(e) => {
            warn!("Failed to load catalog from {}: {}", source.describe(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_source_reads_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courses.json");
        std::fs::write(
            &path,
            r#"[
                {"id": "a", "name": "Algorithms", "rating": 4.2, "reviewCount": 10},
                {"id": "b", "name": "Biology", "rating": null, "reviewCount": 0}
            ]"#,
        )
        .unwrap();

        let courses = FileCourseSource::new(&path).fetch().await.unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[1].rating, None);
    }

    #[tokio::test]
    async fn test_file_source_reads_yaml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courses.yaml");
        std::fs::write(
            &path,
            "- id: a\n  name: Algorithms\n  workload: 12\n  reviewCount: 3\n  isDeprecated: true\n",
        )
        .unwrap();

        let courses = FileCourseSource::new(&path).fetch().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].workload, Some(12.0));
        assert!(courses[0].is_deprecated);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let source = FileCourseSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::IoError { .. }));
    }

    #[tokio::test]
    async fn test_load_or_empty_swallows_failures() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let courses = load_or_empty(&FileCourseSource::new(&path)).await;
        assert!(courses.is_empty());
    }

    #[tokio::test]
    async fn test_static_source_validates() {
        let source = StaticCourseSource::new(vec![
            Course::new("a", "A"),
            Course::new("a", "Again"),
        ]);
        assert!(source.fetch().await.is_err());
        assert!(load_or_empty(&source).await.is_empty());
    }
}
