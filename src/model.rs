//! The endpoint description edited by the user.
//!
//! Field names follow the document format (`operationId`, `requestBodyJsonFields`,
//! `in`, ...), so the same types back the library API and the JSON/YAML documents
//! the editor works on.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::UnknownMethod;

/// Response code used when a response entry has none.
pub const DEFAULT_RESPONSE_CODE: &str = "200";
/// Response description used when a response entry has none.
pub const DEFAULT_RESPONSE_DESCRIPTION: &str = "Success";

/// HTTP method of the documented endpoint.
///
/// Deserialization accepts any casing (`"POST"`, `"Post"`, `"post"`); serialization
/// always writes the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Lowercase method name as written in documents
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMethod(trimmed.to_string()))
    }
}

impl<'de> Deserialize<'de> for HttpMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Path,
    Query,
    Header,
}

impl ParamLocation {
    pub const ALL: [ParamLocation; 3] = [
        ParamLocation::Path,
        ParamLocation::Query,
        ParamLocation::Header,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
        }
    }
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema type allowed for a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Integer,
    Boolean,
    Number,
}

impl ScalarType {
    pub const ALL: [ScalarType; 4] = [
        ScalarType::String,
        ScalarType::Integer,
        ScalarType::Boolean,
        ScalarType::Number,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Integer => "integer",
            ScalarType::Boolean => "boolean",
            ScalarType::Number => "number",
        }
    }
}

/// Schema type allowed for a request body field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    #[default]
    String,
    Integer,
    Boolean,
    Number,
    Array,
    Object,
}

impl SchemaType {
    pub const ALL: [SchemaType; 6] = [
        SchemaType::String,
        SchemaType::Integer,
        SchemaType::Boolean,
        SchemaType::Number,
        SchemaType::Array,
        SchemaType::Object,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SchemaType::String => "string",
            SchemaType::Integer => "integer",
            SchemaType::Boolean => "boolean",
            SchemaType::Number => "number",
            SchemaType::Array => "array",
            SchemaType::Object => "object",
        }
    }

    /// Array and object fields carry children instead of an example.
    pub const fn is_container(self) -> bool {
        matches!(self, SchemaType::Array | SchemaType::Object)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path, query or header parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<ScalarType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, location: ParamLocation) -> Self {
        Self {
            name: name.into(),
            location,
            required: false,
            schema_type: Some(ScalarType::String),
            description: None,
        }
    }
}

/// Scalar example attached to a body field.
///
/// Numbers keep the integer or float form they were written in, so `42` stays `42`
/// and integers beyond `f64` precision are not rounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ExampleValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for ExampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExampleValue::Bool(value) => write!(f, "{value}"),
            ExampleValue::Number(value) => write!(f, "{value}"),
            ExampleValue::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ExampleValue {
    fn from(value: &str) -> Self {
        ExampleValue::Text(value.to_string())
    }
}

impl From<String> for ExampleValue {
    fn from(value: String) -> Self {
        ExampleValue::Text(value)
    }
}

impl From<bool> for ExampleValue {
    fn from(value: bool) -> Self {
        ExampleValue::Bool(value)
    }
}

impl From<i64> for ExampleValue {
    fn from(value: i64) -> Self {
        ExampleValue::Number(value.into())
    }
}

impl From<u64> for ExampleValue {
    fn from(value: u64) -> Self {
        ExampleValue::Number(value.into())
    }
}

/// Non-finite floats have no JSON number form and are kept as text.
impl From<f64> for ExampleValue {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value)
            .map_or_else(|| ExampleValue::Text(value.to_string()), ExampleValue::Number)
    }
}

/// One property of the JSON request body, possibly with nested children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonField {
    #[serde(default)]
    pub property: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<ExampleValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonField>,
}

/// How a field's children are rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// Scalar field; any children are ignored.
    Leaf,
    /// Array whose item schema is built from the children.
    List(&'a [JsonField]),
    /// Object whose properties are the children.
    Object(&'a [JsonField]),
}

impl JsonField {
    pub fn new(property: impl Into<String>, schema_type: SchemaType) -> Self {
        Self {
            property: property.into(),
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn with_example(mut self, example: impl Into<ExampleValue>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_children(mut self, children: Vec<JsonField>) -> Self {
        self.children = children;
        self
    }

    /// Declared type, `string` when absent
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type.unwrap_or_default()
    }

    pub fn shape(&self) -> FieldShape<'_> {
        match self.schema_type() {
            SchemaType::Array => FieldShape::List(&self.children),
            SchemaType::Object => FieldShape::Object(&self.children),
            _ => FieldShape::Leaf,
        }
    }

    /// The example as it appears in the annotation, if it is rendered at all.
    pub fn rendered_example(&self) -> Option<String> {
        if self.schema_type().is_container() {
            return None;
        }
        self.example
            .as_ref()
            .map(ToString::to_string)
            .filter(|text| !text.is_empty())
    }

    /// Number of fields in this subtree, this one included.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(field) = pending.pop() {
            count += 1;
            pending.extend(field.children.iter());
        }
        count
    }
}

/// A documented response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDef {
    /// Written as a string or a bare integer; stored as text either way.
    #[serde(
        default,
        deserialize_with = "code_from_text_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Option<String>")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

impl ResponseDef {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            description: Some(description.into()),
            example: None,
        }
    }

    pub fn code_or_default(&self) -> &str {
        self.code.as_deref().unwrap_or(DEFAULT_RESPONSE_CODE)
    }

    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(DEFAULT_RESPONSE_DESCRIPTION)
    }
}

fn code_from_text_or_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCode {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<RawCode>::deserialize(deserializer)?.map(|code| match code {
        RawCode::Text(text) => text,
        RawCode::Number(number) => number.to_string(),
    }))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Security {
    #[serde(default)]
    pub bearer: bool,
}

/// The structured description of one HTTP operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub method: HttpMethod,
    #[serde(default)]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub request_body_json_fields: Vec<JsonField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<ResponseDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,
}

impl Endpoint {
    /// An endpoint with only a method and a path.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            operation_id: None,
            tags: None,
            summary: None,
            description: None,
            parameters: Vec::new(),
            request_body_json_fields: Vec::new(),
            responses: Vec::new(),
            security: None,
        }
    }

    /// The endpoint an editing session starts with.
    pub fn seeded() -> Self {
        Self {
            operation_id: Some("createSwagger".to_string()),
            tags: Some("Swagger API".to_string()),
            summary: Some("Create Swagger Item".to_string()),
            description: Some("Returns created item data".to_string()),
            request_body_json_fields: vec![JsonField::new("item", SchemaType::String)
                .with_example("test api")
                .with_description("endpoint")],
            responses: vec![ResponseDef::new(
                DEFAULT_RESPONSE_CODE,
                DEFAULT_RESPONSE_DESCRIPTION,
            )],
            security: Some(Security { bearer: false }),
            ..Self::new(HttpMethod::Post, "/swagger/create")
        }
    }

    pub fn requires_bearer(&self) -> bool {
        self.security.is_some_and(|security| security.bearer)
    }

    /// Total number of body fields, nested ones included.
    pub fn field_count(&self) -> usize {
        self.request_body_json_fields
            .iter()
            .map(JsonField::subtree_len)
            .sum()
    }

    /// Body field at `path`, where each entry indexes into the previous level's fields.
    pub fn field(&self, path: &[usize]) -> Option<&JsonField> {
        let (first, rest) = path.split_first()?;
        let mut field = self.request_body_json_fields.get(*first)?;
        for index in rest {
            field = field.children.get(*index)?;
        }
        Some(field)
    }

    /// Paths of every body field in depth-first pre-order.
    pub fn field_paths(&self) -> Vec<Vec<usize>> {
        let mut paths = Vec::with_capacity(self.field_count());
        let mut pending: Vec<(Vec<usize>, &JsonField)> = self
            .request_body_json_fields
            .iter()
            .enumerate()
            .rev()
            .map(|(index, field)| (vec![index], field))
            .collect();

        while let Some((path, field)) = pending.pop() {
            for (index, child) in field.children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(index);
                pending.push((child_path, child));
            }
            paths.push(path);
        }

        paths
    }
}
