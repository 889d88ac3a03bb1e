//! Endpoint documents: the JSON or YAML text form of an [`Endpoint`].

use std::path::Path;

use crate::error::DocumentError;
use crate::model::Endpoint;

/// Text format of an endpoint document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// YAML for `.yaml`/`.yml` files, JSON for everything else.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let is_yaml = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
        if is_yaml {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }
}

pub fn parse(text: &str, format: DocumentFormat) -> Result<Endpoint, DocumentError> {
    let endpoint = match format {
        DocumentFormat::Json => serde_json::from_str(text)?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)?,
    };
    Ok(endpoint)
}

/// Serialize `endpoint` the way the editor writes documents back.
pub fn to_string_pretty(endpoint: &Endpoint, format: DocumentFormat) -> Result<String, DocumentError> {
    let mut text = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(endpoint)?,
        DocumentFormat::Yaml => serde_yaml::to_string(endpoint)?,
    };
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// JSON Schema describing endpoint documents, for editor validation.
pub fn endpoint_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(Endpoint)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HttpMethod, ParamLocation};

    #[test]
    fn picks_format_from_extension() {
        assert_eq!(DocumentFormat::from_path("users.yaml"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("/tmp/users.YML"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path("users.json"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path("users"), DocumentFormat::Json);
    }

    #[test]
    fn parses_yaml_documents() {
        let text = r#"
method: GET
path: /users/{id}
parameters:
  - name: id
    in: path
    required: true
    schemaType: integer
"#;
        let endpoint = parse(text, DocumentFormat::Yaml).unwrap();
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.parameters[0].location, ParamLocation::Path);
        assert!(endpoint.parameters[0].required);
    }

    #[test]
    fn rejects_unknown_methods_with_a_location() {
        let text = "{\n  \"method\": \"options\",\n  \"path\": \"/x\"\n}";
        let err = parse(text, DocumentFormat::Json).unwrap_err();
        assert!(err.to_string().contains("unknown HTTP method"));
        assert_eq!(err.location().map(|(line, _)| line), Some(2));
    }

    #[test]
    fn schema_names_document_keys() {
        let schema = endpoint_schema().to_string();
        assert!(schema.contains("requestBodyJsonFields"));
        assert!(schema.contains("operationId"));
    }
}
