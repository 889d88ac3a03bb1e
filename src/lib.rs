//! Build swagger-php `@OA\...` annotation blocks from a structured endpoint description.
//!
//! An [`EndpointStore`] holds the endpoint being edited and applies merge-style
//! updates; [`render_annotation`] turns the current value into the comment block
//! that goes above a controller method.
//!
//! # Example
//! ```
//! use oadoc::{render_annotation, Endpoint, HttpMethod, ResponseDef};
//!
//! let mut endpoint = Endpoint::new(HttpMethod::Get, "/users");
//! endpoint.summary = Some("List users".into());
//! endpoint.responses.push(ResponseDef::new("200", "All users"));
//!
//! let annotation = render_annotation(&endpoint);
//! assert!(annotation.starts_with("/**\n*    @OA\\Get("));
//! assert!(annotation.ends_with("*    )\n*/"));
//! ```

pub mod document;
pub mod error;
pub mod model;
pub mod policy;
pub mod render;
pub mod store;

pub use document::DocumentFormat;
pub use error::{DocumentError, StoreError, UnknownMethod};
pub use model::{
    Endpoint, ExampleValue, FieldShape, HttpMethod, JsonField, ParamLocation, Parameter,
    ResponseDef, ScalarType, SchemaType, Security,
};
pub use policy::AllowedSections;
pub use render::{annotation_lines, render_annotation};
pub use store::{EndpointPatch, EndpointStore, FieldPatch, ParameterPatch, ResponsePatch};
