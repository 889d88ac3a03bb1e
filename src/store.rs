//! The single endpoint being edited, with merge-style updates.
//!
//! Every edit goes through [`EndpointStore`]. A patch overwrites the keys it
//! carries and leaves the others untouched. The allowed-sections policy is
//! recomputed whenever the method changes.

use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::StoreError;
use crate::model::{
    Endpoint, ExampleValue, HttpMethod, JsonField, ParamLocation, Parameter, ResponseDef,
    ScalarType, SchemaType, Security,
};
use crate::policy::AllowedSections;
use crate::render::render_annotation;

/// Partial update of an [`Endpoint`]. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointPatch {
    pub method: Option<HttpMethod>,
    pub path: Option<String>,
    pub operation_id: Option<String>,
    pub tags: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub parameters: Option<Vec<Parameter>>,
    pub request_body_json_fields: Option<Vec<JsonField>>,
    pub responses: Option<Vec<ResponseDef>>,
    pub security: Option<Security>,
}

/// Partial update of one [`Parameter`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterPatch {
    pub name: Option<String>,
    #[serde(rename = "in")]
    pub location: Option<ParamLocation>,
    pub required: Option<bool>,
    pub schema_type: Option<ScalarType>,
    pub description: Option<String>,
}

/// Partial update of one body field. `children` replaces the whole child list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldPatch {
    pub property: Option<String>,
    pub schema_type: Option<SchemaType>,
    pub example: Option<ExampleValue>,
    pub description: Option<String>,
    pub children: Option<Vec<JsonField>>,
}

/// Partial update of one [`ResponseDef`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResponsePatch {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// Holds the endpoint under edit and the policy derived from its method.
#[derive(Debug, Clone)]
pub struct EndpointStore {
    endpoint: Endpoint,
    allowed: AllowedSections,
}

impl EndpointStore {
    pub fn new(endpoint: Endpoint) -> Self {
        let allowed = AllowedSections::for_method(endpoint.method);
        Self { endpoint, allowed }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn into_endpoint(self) -> Endpoint {
        self.endpoint
    }

    pub fn allowed(&self) -> AllowedSections {
        self.allowed
    }

    /// Render the current endpoint.
    pub fn render(&self) -> String {
        render_annotation(&self.endpoint)
    }

    /// Swap in a whole new endpoint value.
    pub fn replace(&mut self, endpoint: Endpoint) {
        let method = endpoint.method;
        self.endpoint = endpoint;
        self.sync_policy(method);
    }

    /// Shallow-merge `patch` into the endpoint.
    pub fn update(&mut self, patch: EndpointPatch) {
        let EndpointPatch {
            method,
            path,
            operation_id,
            tags,
            summary,
            description,
            parameters,
            request_body_json_fields,
            responses,
            security,
        } = patch;

        let e = &mut self.endpoint;
        merge(&mut e.path, path);
        merge_opt(&mut e.operation_id, operation_id);
        merge_opt(&mut e.tags, tags);
        merge_opt(&mut e.summary, summary);
        merge_opt(&mut e.description, description);
        merge(&mut e.parameters, parameters);
        merge(&mut e.request_body_json_fields, request_body_json_fields);
        merge(&mut e.responses, responses);
        merge_opt(&mut e.security, security);

        if let Some(method) = method {
            self.endpoint.method = method;
            self.sync_policy(method);
        }
    }

    pub fn set_parameters(&mut self, parameters: Vec<Parameter>) {
        self.endpoint.parameters = parameters;
    }

    pub fn set_json_fields(&mut self, fields: Vec<JsonField>) {
        self.endpoint.request_body_json_fields = fields;
    }

    pub fn set_responses(&mut self, responses: Vec<ResponseDef>) {
        self.endpoint.responses = responses;
    }

    /// Parameters the editor shows under the current policy, with their indices.
    ///
    /// Hidden parameters stay in the endpoint and are still rendered.
    pub fn visible_parameters(&self) -> impl Iterator<Item = (usize, &Parameter)> + '_ {
        let allowed = self.allowed;
        self.endpoint
            .parameters
            .iter()
            .enumerate()
            .filter(move |(_, param)| allowed.allows_location(param.location))
    }

    /// Append a parameter named `new` at the first allowed location. Returns its index.
    pub fn add_parameter(&mut self) -> usize {
        let location = self.allowed.default_location();
        let mut param = Parameter::new("new", location);
        param.description = Some(String::new());
        self.endpoint.parameters.push(param);
        debug!(%location, "added parameter");
        self.endpoint.parameters.len() - 1
    }

    pub fn update_parameter(
        &mut self,
        index: usize,
        patch: ParameterPatch,
    ) -> Result<(), StoreError> {
        let len = self.endpoint.parameters.len();
        let param = self
            .endpoint
            .parameters
            .get_mut(index)
            .ok_or(StoreError::ParameterOutOfRange { index, len })?;

        merge(&mut param.name, patch.name);
        merge(&mut param.location, patch.location);
        merge(&mut param.required, patch.required);
        merge_opt(&mut param.schema_type, patch.schema_type);
        merge_opt(&mut param.description, patch.description);
        Ok(())
    }

    pub fn remove_parameter(&mut self, index: usize) -> Result<Parameter, StoreError> {
        let len = self.endpoint.parameters.len();
        if index >= len {
            return Err(StoreError::ParameterOutOfRange { index, len });
        }
        Ok(self.endpoint.parameters.remove(index))
    }

    /// Append a `400 Bad request` response. Returns its index.
    pub fn add_response(&mut self) -> usize {
        self.endpoint
            .responses
            .push(ResponseDef::new("400", "Bad request"));
        debug!("added response");
        self.endpoint.responses.len() - 1
    }

    pub fn update_response(
        &mut self,
        index: usize,
        patch: ResponsePatch,
    ) -> Result<(), StoreError> {
        let len = self.endpoint.responses.len();
        let response = self
            .endpoint
            .responses
            .get_mut(index)
            .ok_or(StoreError::ResponseOutOfRange { index, len })?;

        merge_opt(&mut response.code, patch.code);
        merge_opt(&mut response.description, patch.description);
        Ok(())
    }

    pub fn remove_response(&mut self, index: usize) -> Result<ResponseDef, StoreError> {
        let len = self.endpoint.responses.len();
        if index >= len {
            return Err(StoreError::ResponseOutOfRange { index, len });
        }
        Ok(self.endpoint.responses.remove(index))
    }

    /// Append a top-level body field named `newField`. Returns its path.
    pub fn add_field(&mut self) -> Vec<usize> {
        self.endpoint
            .request_body_json_fields
            .push(blank_field("newField"));
        debug!("added body field");
        vec![self.endpoint.request_body_json_fields.len() - 1]
    }

    /// Field at `path`, where each entry indexes into the previous level's fields.
    pub fn field(&self, path: &[usize]) -> Option<&JsonField> {
        self.endpoint.field(path)
    }

    pub fn field_mut(&mut self, path: &[usize]) -> Result<&mut JsonField, StoreError> {
        let not_found = || StoreError::FieldNotFound {
            path: path.to_vec(),
        };
        let (first, rest) = path.split_first().ok_or_else(not_found)?;
        let mut field = self
            .endpoint
            .request_body_json_fields
            .get_mut(*first)
            .ok_or_else(not_found)?;
        for index in rest {
            field = field.children.get_mut(*index).ok_or_else(not_found)?;
        }
        Ok(field)
    }

    /// Append an empty child to the array or object field at `path`. Returns the child's path.
    pub fn add_child(&mut self, path: &[usize]) -> Result<Vec<usize>, StoreError> {
        let parent = self.field_mut(path)?;
        if !parent.schema_type().is_container() {
            return Err(StoreError::NotAContainer {
                path: path.to_vec(),
            });
        }
        parent.children.push(blank_field(""));

        let mut child_path = path.to_vec();
        child_path.push(parent.children.len() - 1);
        trace!(path = ?child_path, "added child field");
        Ok(child_path)
    }

    pub fn update_field(&mut self, path: &[usize], patch: FieldPatch) -> Result<(), StoreError> {
        let field = self.field_mut(path)?;
        merge(&mut field.property, patch.property);
        merge_opt(&mut field.schema_type, patch.schema_type);
        merge_opt(&mut field.example, patch.example);
        merge_opt(&mut field.description, patch.description);
        merge(&mut field.children, patch.children);
        Ok(())
    }

    /// Remove the field at `path` together with its children.
    pub fn remove_field(&mut self, path: &[usize]) -> Result<JsonField, StoreError> {
        let not_found = || StoreError::FieldNotFound {
            path: path.to_vec(),
        };
        let (last, parent_path) = path.split_last().ok_or_else(not_found)?;
        let siblings = if parent_path.is_empty() {
            &mut self.endpoint.request_body_json_fields
        } else {
            &mut self.field_mut(parent_path)?.children
        };
        if *last >= siblings.len() {
            return Err(not_found());
        }
        Ok(siblings.remove(*last))
    }

    fn sync_policy(&mut self, method: HttpMethod) {
        let allowed = AllowedSections::for_method(method);
        if allowed != self.allowed {
            debug!(%method, ?allowed, "allowed sections changed");
        }
        self.allowed = allowed;
    }
}

impl Default for EndpointStore {
    fn default() -> Self {
        Self::new(Endpoint::seeded())
    }
}

fn blank_field(property: &str) -> JsonField {
    JsonField::new(property, SchemaType::String)
        .with_example("")
        .with_description("")
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn merge_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}
