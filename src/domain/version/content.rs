use crate::domain::version::value_objects::ImpactLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured payload carried by a version. Only `schema`, `variables` and
/// `scripts` have validation semantics; the remaining blocks are inert
/// configuration data passed through to consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionContent {
    pub schema: Option<ContentSchema>,
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub configuration: serde_json::Value,
    #[serde(default)]
    pub settings: serde_json::Value,
    #[serde(default)]
    pub variables: Vec<TemplateVariable>,
    #[serde(default)]
    pub scripts: Vec<TemplateScript>,
    #[serde(default)]
    pub styles: Vec<StyleSheet>,
    #[serde(default)]
    pub translations: Vec<Translation>,
    #[serde(default)]
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSchema {
    /// Schema revision string; a change between versions is a breaking change.
    pub version: String,
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub encoding: String,
    pub checksum: Option<String>,
    #[serde(default)]
    pub structure: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Date,
    Object,
    Array,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableScope {
    Global,
    Template,
    Section,
    Local,
}

impl Default for VariableScope {
    fn default() -> Self {
        Self::Template
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub variable_type: Option<VariableType>,
    #[serde(default)]
    pub scope: VariableScope,
    #[serde(default)]
    pub required: bool,
    pub value: Option<serde_json::Value>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptType {
    Validation,
    Transformation,
    Automation,
    Hook,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateScript {
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub script_type: Option<ScriptType>,
    #[serde(default)]
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSheet {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub media: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub locale: String,
    #[serde(default)]
    pub strings: serde_json::Value,
    #[serde(default)]
    pub coverage: f64,
}

/// Stored validation outcome for a version's content. The boolean flags and
/// suggestions are populated by external checkers; the scorer reads the
/// issue severities and warning count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub schema_valid: bool,
    pub data_valid: bool,
    pub syntax_valid: bool,
    pub semantic_valid: bool,
    pub performance_valid: bool,
    pub security_valid: bool,
    pub accessibility_valid: bool,
    pub compatibility_valid: bool,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            schema_valid: true,
            data_valid: true,
            syntax_valid: true,
            semantic_valid: true,
            performance_valid: true,
            security_valid: true,
            accessibility_valid: true,
            compatibility_valid: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: ImpactLevel,
    pub message: String,
    pub field: Option<String>,
}
