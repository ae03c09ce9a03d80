use crate::DiseaseTemplate;
use anyhow::{Context, Result};
use std::path::Path;

/// Multi-format template parser (JSON, YAML, TOML)
pub struct TemplateParser;

/// Supported template formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    Json,
    Yaml,
    Toml,
}

impl TemplateFormat {
    /// Format implied by the file extension, if it is one we read.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        match extension.to_lowercase().as_str() {
            "json" => Some(TemplateFormat::Json),
            "yaml" | "yml" => Some(TemplateFormat::Yaml),
            "toml" => Some(TemplateFormat::Toml),
            _ => None,
        }
    }
}

impl TemplateParser {
    /// Auto-detect format from file extension and parse
    pub fn parse_file(path: &Path) -> Result<DiseaseTemplate> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read template file: {}", path.display()))?;

        let format = Self::detect_format(path)?;
        Self::parse(&content, format)
            .with_context(|| format!("Invalid template: {}", path.display()))
    }

    /// Parse a template from string with explicit format
    pub fn parse(content: &str, format: TemplateFormat) -> Result<DiseaseTemplate> {
        match format {
            TemplateFormat::Json => {
                serde_json::from_str(content).context("Failed to parse JSON template")
            }
            TemplateFormat::Yaml => {
                serde_yaml::from_str(content).context("Failed to parse YAML template")
            }
            TemplateFormat::Toml => toml::from_str(content).context("Failed to parse TOML template"),
        }
    }

    /// Detect format from file extension
    pub fn detect_format(path: &Path) -> Result<TemplateFormat> {
        TemplateFormat::from_path(path).ok_or_else(|| {
            anyhow::anyhow!("Unsupported template format: {}", path.display())
        })
    }

    /// Serialize a template to string
    pub fn serialize(template: &DiseaseTemplate, format: TemplateFormat) -> Result<String> {
        match format {
            TemplateFormat::Json => {
                serde_json::to_string_pretty(template).context("Failed to serialize to JSON")
            }
            TemplateFormat::Yaml => {
                serde_yaml::to_string(template).context("Failed to serialize to YAML")
            }
            TemplateFormat::Toml => {
                toml::to_string_pretty(template).context("Failed to serialize to TOML")
            }
        }
    }

    /// JSON Schema describing the template record, for template authors.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(DiseaseTemplate);
        serde_json::to_string_pretty(&schema).context("Failed to serialize template schema")
    }
}
