use oadoc::{AllowedSections, HttpMethod, ScalarType, SchemaType};
use serde::{Deserialize, Serialize};

use crate::docs;
use crate::parser::{key_prefix, method_name, section_at, value_context, Section};
use crate::utils::utf16_pos_to_byte_index;

/// Position in a text document
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Character offset in line (UTF-16 code units)
    pub character: usize,
}

/// An auto-completion suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionItemKind,
    /// Short detail shown alongside label
    pub detail: Option<String>,
    pub documentation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionItemKind {
    /// A document key
    Property,
    /// A value for the key on the current line
    Value,
}

const TOP_LEVEL_KEYS: &[&str] = &[
    "method",
    "path",
    "operationId",
    "tags",
    "summary",
    "description",
    "parameters",
    "requestBodyJsonFields",
    "responses",
    "security",
    "bearer",
];
const PARAMETER_KEYS: &[&str] = &["name", "in", "required", "schemaType", "description"];
const FIELD_KEYS: &[&str] = &["property", "schemaType", "example", "description", "children"];
const RESPONSE_KEYS: &[&str] = &["code", "description"];

/// Get completion suggestions at the given position
///
/// Values are offered after a known key (`method`, `in`, `schemaType`, `required`,
/// `bearer`); otherwise the keys valid in the enclosing section are offered.
pub fn get_completions(content: &str, position: Position) -> Vec<CompletionItem> {
    let lines: Vec<&str> = content.lines().collect();

    let line = match lines.get(position.line) {
        Some(line) => *line,
        // A trailing newline leaves the cursor on a line `lines()` does not yield
        None if position.line == lines.len() => "",
        None => return Vec::new(),
    };

    let byte_index = utf16_pos_to_byte_index(line, position.character).unwrap_or(line.len());
    let prefix = &line[..byte_index];

    if let Some((key, partial)) = value_context(prefix) {
        return value_completions(content, position.line, &key, &partial);
    }

    match key_prefix(prefix) {
        Some(partial) => key_completions(content, position.line, &partial),
        None => Vec::new(),
    }
}

fn value_completions(content: &str, line_idx: usize, key: &str, partial: &str) -> Vec<CompletionItem> {
    let values: Vec<(&str, Option<String>)> = match key {
        "method" => HttpMethod::ALL
            .iter()
            .map(|method| {
                let detail = if AllowedSections::for_method(*method).body {
                    "path, query and body"
                } else {
                    "path and query, no request body"
                };
                (method.as_str(), Some(detail.to_string()))
            })
            .collect(),
        "in" => {
            let method = method_name(content).unwrap_or_default();
            AllowedSections::for_method_name(&method)
                .locations()
                .into_iter()
                .map(|location| (location.as_str(), None))
                .collect()
        }
        "schemaType" if section_at(content, line_idx) == Section::Parameters => ScalarType::ALL
            .iter()
            .map(|ty| (ty.as_str(), None))
            .collect(),
        "schemaType" => SchemaType::ALL
            .iter()
            .map(|ty| {
                let detail = ty.is_container().then(|| "takes children".to_string());
                (ty.as_str(), detail)
            })
            .collect(),
        "required" | "bearer" => vec![("true", None), ("false", None)],
        _ => return Vec::new(),
    };

    values
        .into_iter()
        .filter(|(value, _)| starts_with_ignore_case(value, partial))
        .map(|(value, detail)| CompletionItem {
            label: value.to_string(),
            kind: CompletionItemKind::Value,
            detail,
            documentation: None,
        })
        .collect()
}

fn key_completions(content: &str, line_idx: usize, partial: &str) -> Vec<CompletionItem> {
    let keys = match section_at(content, line_idx.saturating_sub(1)) {
        Section::Parameters => PARAMETER_KEYS,
        Section::Fields => FIELD_KEYS,
        Section::Responses => RESPONSE_KEYS,
        Section::Other => TOP_LEVEL_KEYS,
    };
    let body_allowed = method_name(content)
        .map(|name| AllowedSections::for_method_name(&name).body)
        .unwrap_or(true);

    keys.iter()
        .filter(|key| body_allowed || **key != "requestBodyJsonFields")
        .filter(|key| starts_with_ignore_case(key, partial))
        .map(|key| CompletionItem {
            label: key.to_string(),
            kind: CompletionItemKind::Property,
            detail: docs::key_summary(key).map(str::to_string),
            documentation: docs::key_documentation(key).map(str::to_string),
        })
        .collect()
}

fn starts_with_ignore_case(value: &str, partial: &str) -> bool {
    value
        .get(..partial.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(partial))
}
