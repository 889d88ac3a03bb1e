use oadoc_lsp::completion::{get_completions, CompletionItemKind, Position};

fn labels_at(content: &str, line: usize, character: usize) -> Vec<String> {
    get_completions(content, Position { line, character })
        .into_iter()
        .map(|item| item.label)
        .collect()
}

#[test]
fn completes_every_method() {
    let labels = labels_at("method: ", 0, 8);
    assert_eq!(labels, vec!["get", "post", "put", "patch", "delete"]);
}

#[test]
fn completes_partial_method_inside_json_quotes() {
    let content = "{\n  \"method\": \"de";
    assert_eq!(labels_at(content, 1, 15), vec!["delete"]);
}

#[test]
fn method_values_describe_their_sections() {
    let items = get_completions("method: g", Position { line: 0, character: 9 });
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, CompletionItemKind::Value);
    assert_eq!(
        items[0].detail.as_deref(),
        Some("path and query, no request body")
    );
}

#[test]
fn location_values_follow_method_policy() {
    let content = "method: get\nparameters:\n  - name: id\n    in: ";
    assert_eq!(labels_at(content, 3, 8), vec!["path", "query", "header"]);
}

#[test]
fn location_values_for_unknown_method_use_fallback() {
    let content = "method: fetch\nparameters:\n  - name: id\n    in: q";
    assert_eq!(labels_at(content, 3, 9), vec!["query"]);
}

#[test]
fn parameter_schema_types_are_scalar() {
    let content = "method: post\nparameters:\n  - name: id\n    schemaType: ";
    assert_eq!(
        labels_at(content, 3, 16),
        vec!["string", "integer", "boolean", "number"]
    );
}

#[test]
fn field_schema_types_include_containers() {
    let content = r#"{
  "method": "post",
  "requestBodyJsonFields": [
    {
      "property": "tags",
      "schemaType": ""#;
    let labels = labels_at(content, 5, 21);
    assert_eq!(
        labels,
        vec!["string", "integer", "boolean", "number", "array", "object"]
    );

    let partial = format!("{content}ar");
    assert_eq!(labels_at(&partial, 5, 23), vec!["array"]);
}

#[test]
fn boolean_keys_complete_true_and_false() {
    assert_eq!(labels_at("security:\n  bearer: ", 1, 10), vec!["true", "false"]);
    assert_eq!(
        labels_at("parameters:\n  - name: id\n    required: t", 2, 15),
        vec!["true"]
    );
}

#[test]
fn keys_inside_a_parameter_entry() {
    let content = "method: post\nparameters:\n  - name: id\n    ";
    let items = get_completions(content, Position { line: 3, character: 4 });
    let labels: Vec<&str> = items.iter().map(|item| item.label.as_str()).collect();
    assert_eq!(labels, vec!["name", "in", "required", "schemaType", "description"]);
    assert!(items.iter().all(|item| item.kind == CompletionItemKind::Property));
    assert!(items.iter().all(|item| item.documentation.is_some()));
}

#[test]
fn body_key_is_not_offered_without_a_body() {
    assert_eq!(labels_at("method: get\nre", 1, 2), vec!["responses"]);
    assert_eq!(
        labels_at("method: post\nre", 1, 2),
        vec!["requestBodyJsonFields", "responses"]
    );
}

#[test]
fn cursor_after_trailing_newline_offers_top_level_keys() {
    let labels = labels_at("method: post\n", 1, 0);
    assert_eq!(labels.len(), 11);
    assert_eq!(labels[0], "method");
}

#[test]
fn no_completions_inside_free_text_values() {
    assert!(labels_at("summary: Cre", 0, 12).is_empty());
    assert!(labels_at("path: /users", 0, 12).is_empty());
    assert!(labels_at("method: get", 5, 0).is_empty());
}
