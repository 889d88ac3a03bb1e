use oadoc::document::{self, endpoint_schema};
use oadoc::{DocumentFormat, Endpoint, ExampleValue, HttpMethod, ParamLocation, ScalarType};

const YAML: &str = "\
method: PUT
path: /items/{id}
tags: Items
parameters:
  - name: id
    in: path
    required: true
    schemaType: integer
requestBodyJsonFields:
  - property: price
    schemaType: number
    example: 9.5
  - property: active
    schemaType: boolean
    example: true
security:
  bearer: true
";

#[test]
fn reads_yaml_documents() {
    let endpoint = document::parse(YAML, DocumentFormat::Yaml).unwrap();

    assert_eq!(endpoint.method, HttpMethod::Put);
    assert_eq!(endpoint.parameters[0].location, ParamLocation::Path);
    assert_eq!(endpoint.parameters[0].schema_type, Some(ScalarType::Integer));
    assert_eq!(
        endpoint.request_body_json_fields[0].example,
        Some(ExampleValue::from(9.5))
    );
    assert_eq!(
        endpoint.request_body_json_fields[1].example,
        Some(ExampleValue::Bool(true))
    );
    assert!(endpoint.requires_bearer());
}

#[test]
fn json_and_yaml_describe_the_same_endpoint() {
    let from_yaml = document::parse(YAML, DocumentFormat::Yaml).unwrap();
    let json = document::to_string_pretty(&from_yaml, DocumentFormat::Json).unwrap();

    assert!(json.contains(r#""method": "put""#));
    assert!(json.contains(r#""in": "path""#));
    assert!(json.ends_with("}\n"));

    let from_json: Endpoint = document::parse(&json, DocumentFormat::Json).unwrap();
    assert_eq!(from_json, from_yaml);
    assert_eq!(
        oadoc::render_annotation(&from_json),
        oadoc::render_annotation(&from_yaml)
    );
}

#[test]
fn bad_or_missing_method_is_rejected() {
    let err = document::parse("{\n  \"method\": \"trace\"\n}", DocumentFormat::Json).unwrap_err();
    assert!(err.to_string().contains("unknown HTTP method 'trace'"));
    assert_eq!(err.location().map(|(line, _)| line), Some(2));

    let err = document::parse("path: /x\n", DocumentFormat::Yaml).unwrap_err();
    assert!(err.to_string().contains("method"));
}

#[test]
fn format_follows_file_extension() {
    assert_eq!(DocumentFormat::from_path("a/b.yaml"), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path("b.YML"), DocumentFormat::Yaml);
    assert_eq!(DocumentFormat::from_path("b.json"), DocumentFormat::Json);
    assert_eq!(DocumentFormat::from_path("endpoint"), DocumentFormat::Json);
}

#[test]
fn schema_lists_document_keys() {
    let schema = endpoint_schema();
    let properties = schema["properties"].as_object().unwrap();

    for key in ["method", "path", "operationId", "parameters", "requestBodyJsonFields", "responses"] {
        assert!(properties.contains_key(key), "{key}");
    }
}

#[test]
fn numeric_examples_keep_their_written_form() {
    let json = r#"{
  "method": "post",
  "requestBodyJsonFields": [
    { "property": "id", "schemaType": "integer", "example": 42 },
    { "property": "big", "schemaType": "integer", "example": 9007199254740993 },
    { "property": "ratio", "schemaType": "number", "example": 0.25 }
  ]
}"#;
    let endpoint = document::parse(json, DocumentFormat::Json).unwrap();

    let rewritten = document::to_string_pretty(&endpoint, DocumentFormat::Json).unwrap();
    assert!(rewritten.contains(r#""example": 42"#));
    assert!(!rewritten.contains("42.0"));
    assert!(rewritten.contains(r#""example": 9007199254740993"#));
    assert!(rewritten.contains(r#""example": 0.25"#));

    let yaml = document::to_string_pretty(&endpoint, DocumentFormat::Yaml).unwrap();
    assert!(yaml.contains("example: 42\n"));

    let annotation = oadoc::render_annotation(&endpoint);
    assert!(annotation.contains(r#"example="42","#));
    assert!(annotation.contains(r#"example="9007199254740993","#));
    assert!(annotation.contains(r#"example="0.25","#));
}

#[test]
fn response_codes_may_be_numbers_or_strings() {
    let json = r#"{"method": "get", "path": "/x", "responses": [{"code": 404}, {"code": "201"}]}"#;
    let from_json = document::parse(json, DocumentFormat::Json).unwrap();

    let yaml = "method: get\npath: /x\nresponses:\n  - code: 404\n  - code: \"201\"\n";
    let from_yaml = document::parse(yaml, DocumentFormat::Yaml).unwrap();

    for endpoint in [&from_json, &from_yaml] {
        assert_eq!(endpoint.responses[0].code.as_deref(), Some("404"));
        assert_eq!(endpoint.responses[1].code.as_deref(), Some("201"));
    }
    assert_eq!(from_json, from_yaml);
    assert!(oadoc::render_annotation(&from_json)
        .contains(r#"@OA\Response(response=404, description="Success"),"#));

    let rewritten = document::to_string_pretty(&from_json, DocumentFormat::Json).unwrap();
    assert!(rewritten.contains(r#""code": "404""#));
}

#[test]
fn null_response_code_falls_back_to_default() {
    let json = r#"{"method": "get", "responses": [{"code": null, "description": "Ok"}]}"#;
    let endpoint = document::parse(json, DocumentFormat::Json).unwrap();
    assert_eq!(endpoint.responses[0].code, None);
    assert_eq!(endpoint.responses[0].code_or_default(), "200");
}
