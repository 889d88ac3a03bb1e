//! Hover documentation for endpoint document keys.

/// Markdown documentation for a document key, if it is one the server knows.
pub fn key_documentation(key: &str) -> Option<&'static str> {
    let doc = match key {
        "method" => {
            r#"# method

HTTP method of the endpoint. Any casing is accepted; documents are written in lowercase.

## Values
- `get`: no request body is offered or rendered
- `post`, `put`, `patch`: path, query and body sections are all available
- `delete`: no request body is offered in the editor, but body fields already
  in the document are still rendered

## Example
```json
"method": "post"
```
"#
        }
        "path" => {
            r#"# path

URL path of the endpoint, rendered as `path="..."`. Quotes and backslashes are escaped.

## Example
```json
"path": "/users/{id}"
```
"#
        }
        "operationId" => {
            r#"# operationId

Unique operation identifier. Omitted from the annotation when empty.
"#
        }
        "tags" => {
            r#"# tags

A single tag name, rendered as `tags={"..."}`. Omitted when empty.
"#
        }
        "summary" => "# summary\n\nShort summary line. Omitted when empty.\n",
        "description" => {
            r#"# description

Longer description of the endpoint, parameter, field or response it is attached to.
Omitted when empty.
"#
        }
        "parameters" => {
            r#"# parameters

Path, query and header parameters. Each entry renders an `@OA\Parameter` block.

## Example
```json
"parameters": [
  { "name": "id", "in": "path", "required": true, "schemaType": "integer" }
]
```

Entries whose location the method does not offer are hidden in the editor but
still rendered.
"#
        }
        "name" => "# name\n\nParameter name.\n",
        "in" => {
            r#"# in

Where the parameter is carried: `path`, `query` or `header`.
"#
        }
        "required" => "# required\n\nWhether the parameter is required. Defaults to `false`.\n",
        "schemaType" => {
            r#"# schemaType

Schema type of a parameter or body field.

## Values
- Parameters: `string`, `integer`, `boolean`, `number`
- Body fields: the above, plus `array` and `object`

A missing type renders as `string`.
"#
        }
        "requestBodyJsonFields" => {
            r#"# requestBodyJsonFields

Properties of the JSON request body. Rendered inside
`@OA\RequestBody(@OA\JsonContent(...))` unless the method is `get` or the list is empty.

`object` fields nest their children directly; `array` fields wrap them in `@OA\Items`.
"#
        }
        "property" => "# property\n\nName of the body field.\n",
        "example" => {
            r#"# example

Example value of a scalar body field. Always rendered quoted, so `42` becomes
`example="42"`. Ignored for `array` and `object` fields.
"#
        }
        "children" => {
            r#"# children

Nested fields of an `array` or `object` field. Ignored for scalar fields.
"#
        }
        "responses" => {
            r#"# responses

Response entries. Each renders an `@OA\Response` block; when the list is empty a
single `200 Success` response is rendered instead.
"#
        }
        "code" => {
            r#"# code

HTTP status code of the response. A missing code renders as `200`.

## Common Status Codes
- `200`: OK
- `201`: Created
- `400`: Bad Request
- `401`: Unauthorized
- `404`: Not Found
- `422`: Unprocessable Entity
"#
        }
        "security" => "# security\n\nSecurity settings of the endpoint.\n",
        "bearer" => {
            r#"# bearer

When `true`, the annotation carries `security={{"sanctum": {}}}`.
"#
        }
        _ => return None,
    };
    Some(doc)
}

/// One-line summary used as completion detail.
pub fn key_summary(key: &str) -> Option<&'static str> {
    key_documentation(key)?
        .lines()
        .skip_while(|line| line.starts_with('#') || line.trim().is_empty())
        .find(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_are_documented() {
        for key in ["method", "in", "schemaType", "bearer", "requestBodyJsonFields"] {
            assert!(key_documentation(key).is_some(), "{key}");
        }
        assert!(key_documentation("unknown").is_none());
    }

    #[test]
    fn summary_is_first_prose_line() {
        assert_eq!(key_summary("name"), Some("Parameter name."));
        assert_eq!(
            key_summary("in"),
            Some("Where the parameter is carried: `path`, `query` or `header`.")
        );
    }
}
