//! Rendering of an [`Endpoint`] into a swagger-php `@OA\...` annotation block.
//!
//! The output is a `/** ... */` comment. Every content line starts with `*`
//! followed by four spaces per nesting level, and lines are joined with `\n`.
//! Rendering is total: absent optional data is omitted, never reported.

use crate::model::{Endpoint, FieldShape, HttpMethod, JsonField};

const INDENT: &str = "    ";
const SANCTUM_SECURITY: &str = r#"security={{"sanctum": {}}}"#;

/// Render the annotation block for `endpoint`.
pub fn render_annotation(endpoint: &Endpoint) -> String {
    annotation_lines(endpoint).join("\n")
}

/// The annotation block as individual lines, opening and closing markers included.
pub fn annotation_lines(endpoint: &Endpoint) -> Vec<String> {
    let mut out = Lines::default();

    out.raw("/**");
    out.push(1, format!(r"@OA\{}(", method_token(endpoint.method)));
    out.push(2, format!(r#"path="{}","#, escape_quoted(&endpoint.path)));

    if endpoint.requires_bearer() {
        out.push(2, format!("{SANCTUM_SECURITY},"));
    }
    if let Some(id) = non_empty(&endpoint.operation_id) {
        out.push(2, format!(r#"operationId="{}","#, escape_quoted(id)));
    }
    if let Some(tags) = non_empty(&endpoint.tags) {
        out.push(2, format!(r#"tags={{"{}"}},"#, escape_quoted(tags)));
    }
    if let Some(summary) = non_empty(&endpoint.summary) {
        out.push(2, format!(r#"summary="{}","#, escape_quoted(summary)));
    }
    if let Some(description) = non_empty(&endpoint.description) {
        out.push(2, format!(r#"description="{}","#, escape_quoted(description)));
    }

    for param in &endpoint.parameters {
        out.push(2, r"@OA\Parameter(");
        out.push(3, format!(r#"name="{}","#, escape_quoted(&param.name)));
        out.push(3, format!(r#"in="{}","#, param.location));
        if let Some(description) = non_empty(&param.description) {
            out.push(3, format!(r#"description="{}","#, escape_quoted(description)));
        }
        out.push(3, format!("required={},", param.required));
        if let Some(schema_type) = param.schema_type {
            out.push(3, format!(r#"@OA\Schema(type="{}"),"#, schema_type.as_str()));
        }
        out.push(2, "),");
    }

    if endpoint.method != HttpMethod::Get && !endpoint.request_body_json_fields.is_empty() {
        out.push(2, r"@OA\RequestBody(");
        out.push(3, "required=true,");
        out.push(3, r"@OA\JsonContent(");
        render_fields(&mut out, &endpoint.request_body_json_fields, 4);
        out.push(3, "),");
        out.push(2, "),");
    }

    if endpoint.responses.is_empty() {
        out.push(2, r#"@OA\Response(response=200, description="Success"),"#);
    } else {
        for response in &endpoint.responses {
            out.push(
                2,
                format!(
                    r#"@OA\Response(response={}, description="{}"),"#,
                    response.code_or_default(),
                    escape_quoted(response.description_or_default())
                ),
            );
        }
    }

    out.strip_trailing_comma();
    out.push(1, ")");
    out.raw("*/");
    out.into_inner()
}

/// Escape `s` for use inside a double-quoted annotation string.
///
/// Backslashes are doubled before quotes are escaped, so the backslashes added for
/// quotes are not escaped again.
pub fn escape_quoted(s: &str) -> String {
    s.replace('\\', r"\\").replace('"', r#"\""#)
}

/// Uppercase the first character and lowercase the rest.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Annotation name for a method, e.g. `Post` for `@OA\Post`
pub fn method_token(method: HttpMethod) -> String {
    capitalize(method.as_str())
}

enum Step<'a> {
    Field(&'a JsonField, usize),
    Close(usize),
}

/// Render body fields starting at `depth` using an explicit work stack.
fn render_fields(out: &mut Lines, fields: &[JsonField], depth: usize) {
    let mut stack: Vec<Step<'_>> = fields
        .iter()
        .rev()
        .map(|field| Step::Field(field, depth))
        .collect();

    while let Some(step) = stack.pop() {
        let (field, depth) = match step {
            Step::Close(depth) => {
                out.push(depth, "),");
                continue;
            }
            Step::Field(field, depth) => (field, depth),
        };

        out.push(depth, r"@OA\Property(");
        if !field.property.is_empty() {
            out.push(
                depth + 1,
                format!(r#"property="{}","#, escape_quoted(&field.property)),
            );
        }
        out.push(depth + 1, format!(r#"type="{}","#, field.schema_type()));
        if let Some(description) = non_empty(&field.description) {
            out.push(
                depth + 1,
                format!(r#"description="{}","#, escape_quoted(description)),
            );
        }
        if let Some(example) = field.rendered_example() {
            out.push(depth + 1, format!(r#"example="{}","#, escape_quoted(&example)));
        }

        stack.push(Step::Close(depth));
        match field.shape() {
            FieldShape::List(children) if !children.is_empty() => {
                out.push(depth + 1, r"@OA\Items(");
                stack.push(Step::Close(depth + 1));
                stack.extend(children.iter().rev().map(|child| Step::Field(child, depth + 2)));
            }
            FieldShape::Object(children) => {
                stack.extend(children.iter().rev().map(|child| Step::Field(child, depth + 1)));
            }
            _ => {}
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[derive(Default)]
struct Lines(Vec<String>);

impl Lines {
    fn raw(&mut self, line: impl Into<String>) {
        self.0.push(line.into());
    }

    fn push(&mut self, depth: usize, content: impl AsRef<str>) {
        self.0
            .push(format!("*{}{}", INDENT.repeat(depth), content.as_ref()));
    }

    /// Drop trailing commas (and whitespace after them) from the last line.
    fn strip_trailing_comma(&mut self) {
        if let Some(last) = self.0.last_mut() {
            let trimmed = last.trim_end();
            if trimmed.ends_with(',') {
                *last = trimmed.trim_end_matches(',').to_string();
            }
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.0
    }
}
