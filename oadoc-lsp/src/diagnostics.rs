use oadoc::document;
use oadoc::{AllowedSections, DocumentFormat, FieldShape, HttpMethod};

use crate::config::ServerConfig;
use crate::parser::EntryLines;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Hint,
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: usize,
    /// Byte offset where the highlighted range starts; `None` for the line start
    pub char_start: Option<usize>,
    /// Byte offset where the highlighted range ends; `None` for the line end
    pub char_end: Option<usize>,
    pub message: String,
    pub severity: DiagnosticSeverity,
}

impl Diagnostic {
    fn at_line(line: usize, severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            line,
            char_start: None,
            char_end: None,
            message: message.into(),
            severity,
        }
    }
}

pub fn validate_document(
    content: &str,
    format: DocumentFormat,
    config: &ServerConfig,
) -> Vec<Diagnostic> {
    let endpoint = match document::parse(content, format) {
        Ok(endpoint) => endpoint,
        Err(err) => {
            let (line, column) = err.location().unwrap_or((1, 1));
            let mut diag = Diagnostic::at_line(
                line.saturating_sub(1),
                DiagnosticSeverity::Error,
                err.to_string(),
            );
            diag.char_start = Some(column.saturating_sub(1));
            return vec![diag];
        }
    };

    let mut diagnostics = Vec::new();
    let entries = EntryLines::scan(content, &endpoint);

    if config.policy_diagnostics
        && !AllowedSections::for_method(endpoint.method).body
        && !endpoint.request_body_json_fields.is_empty()
    {
        let message = if endpoint.method == HttpMethod::Get {
            "GET endpoints never render a request body; these fields are ignored".to_string()
        } else {
            format!(
                "{} endpoints do not offer a request body in the editor, but these fields are still rendered",
                endpoint.method.as_str().to_uppercase()
            )
        };
        diagnostics.push(Diagnostic::at_line(
            entries.body.unwrap_or(0),
            DiagnosticSeverity::Warning,
            message,
        ));
    }

    for path in endpoint.field_paths() {
        let Some(field) = endpoint.field(&path) else {
            continue;
        };
        let line = entries.field_line(&path).unwrap_or(0);
        let schema_type = field.schema_type();

        if schema_type.is_container() && field.example.is_some() {
            diagnostics.push(Diagnostic::at_line(
                line,
                DiagnosticSeverity::Hint,
                format!("example is ignored for {schema_type} fields"),
            ));
        }
        if field.shape() == FieldShape::Leaf && !field.children.is_empty() {
            diagnostics.push(Diagnostic::at_line(
                line,
                DiagnosticSeverity::Hint,
                format!("children are ignored for {schema_type} fields"),
            ));
        }
    }

    diagnostics
}
