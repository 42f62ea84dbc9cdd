use anyhow::{anyhow, Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::lists::{PaginationConfig, SortAttribute, SortConfig, SortDirection, DEFAULT_PAGE_SIZES};

/// Application configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Catalog snapshot to browse (JSON or YAML array of courses)
    pub catalog_path: Option<PathBuf>,

    /// Page sizes offered to the user; the smallest is the initial size
    pub page_sizes: Vec<usize>,

    /// Order used when the view mounts
    pub default_sort: SortConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_sort: SortConfig::default(),
        }
    }
}

impl Config {
    /// Initialize configuration from defaults, config files and environment.
    ///
    /// An explicit path must exist; the well-known locations are optional.
    pub async fn init(explicit_path: Option<&Path>) -> Result<Self> {
        debug!("Initializing configuration");

        let mut config = Self::default();

        match explicit_path {
            Some(path) => config.merge_with(Self::load_from_path(path).await?),
            None => {
                if let Some(file_config) = Self::load_from_file().await? {
                    config.merge_with(file_config);
                }
            }
        }

        config.load_from_env()?;
        config.validate()?;

        Ok(config)
    }

    /// Well-known configuration locations, in priority order
    pub fn search_paths() -> Vec<PathBuf> {
        let mut config_paths = vec![
            PathBuf::from("./.courselens.json"),
            PathBuf::from("./courselens.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            config_paths.push(config_dir.join("courselens").join("courselens.json"));
        }

        config_paths
    }

    /// Load the first configuration file found in [`Config::search_paths`]
    pub async fn load_from_file() -> Result<Option<Self>> {
        for path in Self::search_paths() {
            if path.exists() {
                return Self::load_from_path(&path).await.map(Some);
            }
        }
        Ok(None)
    }

    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!("Loading configuration from: {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply `COURSELENS_*` environment variables
    pub fn load_from_env(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("COURSELENS_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Ok(sizes) = std::env::var("COURSELENS_PAGE_SIZES") {
            self.page_sizes = parse_page_sizes(&sizes)
                .context("Invalid COURSELENS_PAGE_SIZES")?;
        }

        if let Ok(sort) = std::env::var("COURSELENS_SORT") {
            self.default_sort = parse_sort_spec(&sort).context("Invalid COURSELENS_SORT")?;
        }

        Ok(())
    }

    /// Merge another configuration into this one
    pub fn merge_with(&mut self, other: Self) {
        if other.catalog_path.is_some() {
            self.catalog_path = other.catalog_path;
        }
        if !other.page_sizes.is_empty() && other.page_sizes != DEFAULT_PAGE_SIZES {
            self.page_sizes = other.page_sizes;
        }
        if other.default_sort != SortConfig::default() {
            self.default_sort = other.default_sort;
        }
    }

    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig::new(self.page_sizes.clone())
    }

    /// Validate the configuration.
    ///
    /// The default sort needs no check here: serde and [`parse_sort_spec`]
    /// only produce known attributes and directions.
    pub fn validate(&self) -> Result<()> {
        if self.page_sizes.is_empty() {
            return Err(anyhow!("At least one page size must be configured"));
        }

        if self.page_sizes.contains(&0) {
            return Err(anyhow!("Page sizes must be greater than 0"));
        }

        Ok(())
    }
}

/// Parse a comma separated list such as `10,25,50`
pub fn parse_page_sizes(input: &str) -> Result<Vec<usize>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .with_context(|| format!("'{}' is not a page size", part))
        })
        .collect()
}

/// Parse `attribute` or `attribute:asc|desc`
pub fn parse_sort_spec(input: &str) -> Result<SortConfig> {
    let (attribute, direction) = match input.split_once(':') {
        Some((attribute, direction)) => (attribute, Some(direction)),
        None => (input, None),
    };

    let attribute: SortAttribute = attribute.parse()?;
    let direction = match direction.map(|d| d.trim().to_ascii_lowercase()) {
        None => SortDirection::Asc,
        Some(d) if d == "asc" => SortDirection::Asc,
        Some(d) if d == "desc" => SortDirection::Desc,
        Some(d) => return Err(anyhow!("Unknown sort direction '{}'", d)),
    };

    Ok(SortConfig::new(attribute, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.pagination().default_page_size(), 10);
    }

    #[test]
    fn test_validate_rejects_bad_page_sizes() {
        let mut config = Config::default();
        config.page_sizes = Vec::new();
        assert!(config.validate().is_err());

        config.page_sizes = vec![10, 0];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_page_sizes() {
        assert_eq!(parse_page_sizes("10, 20,40").unwrap(), vec![10, 20, 40]);
        assert!(parse_page_sizes("10,lots").is_err());
    }

    #[test]
    fn test_parse_sort_spec() {
        assert_eq!(
            parse_sort_spec("rating:desc").unwrap(),
            SortConfig::new(SortAttribute::Rating, SortDirection::Desc)
        );
        assert_eq!(
            parse_sort_spec("name").unwrap(),
            SortConfig::new(SortAttribute::Name, SortDirection::Asc)
        );
        assert!(parse_sort_spec("name:sideways").is_err());
        assert!(parse_sort_spec("colour").is_err());
    }

    #[test]
    fn test_merge_keeps_defaults_for_unset_fields() {
        let mut config = Config::default();
        config.merge_with(Config {
            catalog_path: Some(PathBuf::from("courses.json")),
            ..Config::default()
        });
        assert_eq!(config.catalog_path, Some(PathBuf::from("courses.json")));
        assert_eq!(config.page_sizes, DEFAULT_PAGE_SIZES.to_vec());
        assert_eq!(config.default_sort, SortConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courselens.json");
        std::fs::write(
            &path,
            r#"{"pageSizes": [20, 40], "defaultSort": {"attribute": "rating", "direction": "desc"}}"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        assert_eq!(config.page_sizes, vec![20, 40]);
        assert_eq!(config.default_sort.attribute, SortAttribute::Rating);
        assert_eq!(config.catalog_path, None);
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_default_sort() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("courselens.json");
        std::fs::write(
            &path,
            r#"{"defaultSort": {"attribute": "popularity", "direction": "desc"}}"#,
        )
        .unwrap();
        assert!(Config::load_from_path(&path).await.is_err());
    }

    #[test]
    fn test_serializes_camel_case_keys() {
        let value = serde_json::to_value(Config::default()).unwrap();
        assert!(value.get("pageSizes").is_some());
        assert_eq!(value["defaultSort"]["attribute"], "reviewCount");
        assert!(value.get("page_sizes").is_none());
    }

    #[tokio::test]
    async fn test_load_from_missing_path_fails() {
        let dir = tempdir().unwrap();
        assert!(Config::load_from_path(&dir.path().join("nope.json")).await.is_err());
    }
}
