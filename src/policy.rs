//! Which parts of an endpoint the editor offers for a given method.
//!
//! The policy only drives editing affordances. The renderer never consults it:
//! a GET endpoint with path parameters hidden by the editor still renders them.

use serde::Serialize;

use crate::model::{HttpMethod, ParamLocation};

/// Parameter locations and request body availability for one method.
///
/// Header parameters are always allowed and have no flag here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllowedSections {
    pub path: bool,
    pub query: bool,
    pub body: bool,
}

impl AllowedSections {
    /// Used for method names that are not recognized.
    pub const FALLBACK: AllowedSections = AllowedSections {
        path: true,
        query: true,
        body: false,
    };

    pub const fn for_method(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get | HttpMethod::Delete => AllowedSections {
                path: true,
                query: true,
                body: false,
            },
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => AllowedSections {
                path: true,
                query: true,
                body: true,
            },
        }
    }

    /// Policy for a raw method name, falling back to [`Self::FALLBACK`].
    pub fn for_method_name(name: &str) -> Self {
        name.parse::<HttpMethod>()
            .map(Self::for_method)
            .unwrap_or(Self::FALLBACK)
    }

    pub const fn allows_location(self, location: ParamLocation) -> bool {
        match location {
            ParamLocation::Path => self.path,
            ParamLocation::Query => self.query,
            ParamLocation::Header => true,
        }
    }

    /// Allowed locations in display order (path, query, header).
    pub fn locations(self) -> Vec<ParamLocation> {
        ParamLocation::ALL
            .into_iter()
            .filter(|location| self.allows_location(*location))
            .collect()
    }

    /// Location given to a freshly added parameter.
    pub fn default_location(self) -> ParamLocation {
        if self.path {
            ParamLocation::Path
        } else if self.query {
            ParamLocation::Query
        } else {
            ParamLocation::Header
        }
    }
}
