use crate::domain::version::content::VersionContent;
use serde::{Deserialize, Serialize};

/// Outcome of structural content validation. Errors block creation;
/// warnings are carried through to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

pub fn validate_version_content(content: &VersionContent) -> ContentValidation {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    match &content.schema {
        None => errors.push("content schema is required".to_owned()),
        Some(schema) => {
            if schema.version.trim().is_empty() {
                errors.push("schema version is required".to_owned());
            }
            if schema.schema_type.trim().is_empty() {
                errors.push("schema type is required".to_owned());
            }
            if schema.checksum.is_none() {
                warnings.push("schema checksum is missing; integrity cannot be verified".to_owned());
            }
        }
    }

    if content.data.is_none() {
        warnings.push("content data is empty".to_owned());
    }

    for (index, variable) in content.variables.iter().enumerate() {
        if variable.name.trim().is_empty() {
            errors.push(format!("variable at index {index} is missing a name"));
        }
        if variable.variable_type.is_none() {
            errors.push(format!("variable at index {index} is missing a type"));
        }
        if variable.required && variable.value.is_none() {
            errors.push(format!(
                "required variable '{}' has no value",
                variable.name
            ));
        }
    }

    for (index, script) in content.scripts.iter().enumerate() {
        if script.name.trim().is_empty() {
            errors.push(format!("script at index {index} is missing a name"));
        }
        if script.content.trim().is_empty() {
            errors.push(format!("script at index {index} has no content"));
        }
        if script.script_type.is_none() {
            errors.push(format!("script at index {index} is missing a type"));
        }
    }

    ContentValidation {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::content::{
        ContentSchema, ScriptType, TemplateScript, TemplateVariable, VariableScope, VariableType,
    };

    fn schema() -> ContentSchema {
        ContentSchema {
            version: "1.0".to_owned(),
            schema_type: "email".to_owned(),
            format: "json".to_owned(),
            encoding: "utf-8".to_owned(),
            checksum: Some("abc123".to_owned()),
            structure: serde_json::Value::Null,
        }
    }

    fn variable(name: &str) -> TemplateVariable {
        TemplateVariable {
            name: name.to_owned(),
            variable_type: Some(VariableType::String),
            scope: VariableScope::Template,
            required: false,
            value: None,
            description: None,
        }
    }

    #[test]
    fn missing_schema_is_an_error() {
        let result = validate_version_content(&VersionContent::default());
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("schema is required")));
    }

    #[test]
    fn missing_checksum_is_only_a_warning() {
        let mut content = VersionContent {
            schema: Some(schema()),
            data: Some(serde_json::json!({"body": "hello"})),
            ..VersionContent::default()
        };
        content.schema.as_mut().unwrap().checksum = None;
        let result = validate_version_content(&content);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn missing_data_is_a_warning() {
        let content = VersionContent {
            schema: Some(schema()),
            ..VersionContent::default()
        };
        let result = validate_version_content(&content);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("data is empty")));
    }

    #[test]
    fn required_variable_without_value_is_an_error() {
        let mut var = variable("customer_name");
        var.required = true;
        let content = VersionContent {
            schema: Some(schema()),
            data: Some(serde_json::Value::Null),
            variables: vec![var],
            ..VersionContent::default()
        };
        let result = validate_version_content(&content);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("customer_name")));
    }

    #[test]
    fn optional_variable_without_value_is_fine() {
        let content = VersionContent {
            schema: Some(schema()),
            data: Some(serde_json::Value::Null),
            variables: vec![variable("signature")],
            ..VersionContent::default()
        };
        assert!(validate_version_content(&content).is_valid);
    }

    #[test]
    fn incomplete_script_is_an_error() {
        let content = VersionContent {
            schema: Some(schema()),
            data: Some(serde_json::Value::Null),
            scripts: vec![TemplateScript {
                name: "on_render".to_owned(),
                content: String::new(),
                script_type: Some(ScriptType::Hook),
                triggers: Vec::new(),
            }],
            ..VersionContent::default()
        };
        let result = validate_version_content(&content);
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("has no content")));
    }
}
