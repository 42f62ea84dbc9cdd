//! Schema command: JSON schema generation and catalog validation

use anyhow::{anyhow, Context, Result};
use clap::{Args, Subcommand};
use schemars::schema_for;
use serde_json::Value;
use std::{fs, path::Path, path::PathBuf};
use tracing::debug;

use courselens::catalog::{validate_catalog, Course};
use courselens::config::Config;

/// Print the catalog or configuration schema, or validate a catalog file
#[derive(Debug, Args)]
pub struct SchemaCommand {
    /// Output format for schema generation
    #[arg(short, long, default_value = "json")]
    pub format: SchemaFormat,

    /// Output file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty print the output
    #[arg(short, long)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Option<SchemaSubcommand>,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum SchemaFormat {
    Json,
    Yaml,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaTarget {
    /// Array of course records
    Catalog,
    /// courselens.json
    Config,
}

#[derive(Debug, Subcommand)]
pub enum SchemaSubcommand {
    /// Generate a JSON schema
    Generate {
        #[arg(long, default_value = "catalog")]
        target: SchemaTarget,
    },
    /// Validate a catalog file against the schema and the catalog rules
    Validate {
        /// Catalog file to validate (JSON or YAML)
        catalog_file: PathBuf,
    },
}

impl SchemaCommand {
    pub async fn execute(&self, _config: &Config) -> Result<()> {
        match &self.command {
            Some(SchemaSubcommand::Generate { target }) => self.generate_schema(*target),
            Some(SchemaSubcommand::Validate { catalog_file }) => {
                let report = validate_catalog_file(catalog_file)?;
                println!("{}", report);
                Ok(())
            }
            None => self.generate_schema(SchemaTarget::Catalog),
        }
    }

    fn generate_schema(&self, target: SchemaTarget) -> Result<()> {
        let schema_value = schema_value(target)?;

        let output = match self.format {
            SchemaFormat::Json => {
                if self.pretty {
                    serde_json::to_string_pretty(&schema_value)?
                } else {
                    serde_json::to_string(&schema_value)?
                }
            }
            SchemaFormat::Yaml => {
                serde_yaml::to_string(&schema_value).context("Failed to convert schema to YAML")?
            }
        };

        if let Some(ref output_path) = self.output {
            fs::write(output_path, output)
                .with_context(|| format!("Failed to write schema to: {}", output_path.display()))?;
            println!("Schema written to: {}", output_path.display());
        } else {
            println!("{}", output);
        }

        Ok(())
    }
}

fn schema_value(target: SchemaTarget) -> Result<Value> {
    let (schema, title) = match target {
        SchemaTarget::Catalog => (schema_for!(Vec<Course>), "Course catalog"),
        SchemaTarget::Config => (schema_for!(Config), "courselens configuration"),
    };

    let mut schema_value =
        serde_json::to_value(schema).context("Failed to convert schema to JSON value")?;

    if let Some(obj) = schema_value.as_object_mut() {
        obj.insert("title".to_string(), Value::String(title.to_string()));
    }

    Ok(schema_value)
}

fn read_catalog_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML catalog: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON catalog: {}", path.display()))
    }
}

/// Check a catalog file's shape against the schema, then the catalog rules
fn validate_catalog_file(path: &Path) -> Result<String> {
    debug!("Validating catalog: {}", path.display());

    let catalog_value = read_catalog_value(path)?;
    let schema_value = schema_value(SchemaTarget::Catalog)?;

    let compiled_schema = jsonschema::JSONSchema::compile(&schema_value)
        .map_err(|e| anyhow!("Failed to compile JSON schema: {}", e))?;

    if let Err(errors) = compiled_schema.validate(&catalog_value) {
        let details: Vec<String> = errors
            .map(|error| format!("  - {}: {}", error.instance_path, error))
            .collect();
        return Err(anyhow!(
            "Catalog does not match the schema:\n{}",
            details.join("\n")
        ));
    }

    let courses: Vec<Course> =
        serde_json::from_value(catalog_value).context("Catalog matches the schema but cannot be loaded")?;
    validate_catalog(&courses)?;

    Ok(format!("Catalog is valid: {} courses", courses.len()))
}
