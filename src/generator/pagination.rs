use std::fmt;
use std::str::FromStr;

use askama::Template;

use super::naming::EntityNames;
use crate::error::{GenerateError, Result};

/// How a generated `get_all` listing is shaped.
///
/// Each variant contributes the service-layer `get_all` function and the
/// route-layer list handler. Service and route strategies are chosen
/// independently per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaginationStrategy {
    /// `skip`/`limit` offset paging.
    #[default]
    LimitOffset,
    /// Keyset paging on the primary key: `cursor` is the last id seen.
    Cursor,
    /// Unbounded listing.
    None,
}

#[derive(Template)]
#[template(path = "pagination/service_limit_offset.py.txt", escape = "none")]
struct LimitOffsetService<'a> {
    class_name: &'a str,
}

#[derive(Template)]
#[template(path = "pagination/service_cursor.py.txt", escape = "none")]
struct CursorService<'a> {
    class_name: &'a str,
}

#[derive(Template)]
#[template(path = "pagination/service_none.py.txt", escape = "none")]
struct UnpagedService<'a> {
    class_name: &'a str,
}

#[derive(Template)]
#[template(path = "pagination/route_limit_offset.py.txt", escape = "none")]
struct LimitOffsetRoute<'a> {
    route_name: &'a str,
    response_class: &'a str,
    service_module: &'a str,
}

#[derive(Template)]
#[template(path = "pagination/route_cursor.py.txt", escape = "none")]
struct CursorRoute<'a> {
    route_name: &'a str,
    response_class: &'a str,
    service_module: &'a str,
}

#[derive(Template)]
#[template(path = "pagination/route_none.py.txt", escape = "none")]
struct UnpagedRoute<'a> {
    route_name: &'a str,
    response_class: &'a str,
    service_module: &'a str,
}

impl PaginationStrategy {
    pub const ALL: [PaginationStrategy; 3] = [
        PaginationStrategy::LimitOffset,
        PaginationStrategy::Cursor,
        PaginationStrategy::None,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaginationStrategy::LimitOffset => "limit-offset",
            PaginationStrategy::Cursor => "cursor",
            PaginationStrategy::None => "none",
        }
    }

    /// Query parameters the list endpoint accepts, in declaration order.
    #[must_use]
    pub fn query_parameters(self) -> &'static [&'static str] {
        match self {
            PaginationStrategy::LimitOffset => &["skip", "limit"],
            PaginationStrategy::Cursor => &["cursor", "limit"],
            PaginationStrategy::None => &[],
        }
    }

    /// `typing` names the route module needs for this strategy.
    #[must_use]
    pub fn route_typing_imports(self) -> &'static str {
        match self {
            PaginationStrategy::Cursor => "List, Optional",
            PaginationStrategy::LimitOffset | PaginationStrategy::None => "List",
        }
    }

    /// Render the service-layer `get_all` function.
    ///
    /// # Errors
    ///
    /// Propagates template rendering failures.
    pub fn service_fragment(self, names: &EntityNames) -> Result<String> {
        let class_name = names.class_name.as_str();
        let rendered = match self {
            PaginationStrategy::LimitOffset => LimitOffsetService { class_name }.render()?,
            PaginationStrategy::Cursor => CursorService { class_name }.render()?,
            PaginationStrategy::None => UnpagedService { class_name }.render()?,
        };
        Ok(rendered)
    }

    /// Render the route-layer list handler delegating to `get_all`.
    ///
    /// # Errors
    ///
    /// Propagates template rendering failures.
    pub fn route_fragment(self, names: &EntityNames) -> Result<String> {
        let response_class = names.response_class();
        let service_module = names.service_module();
        let route_name = names.route_name.as_str();
        let rendered = match self {
            PaginationStrategy::LimitOffset => LimitOffsetRoute {
                route_name,
                response_class: &response_class,
                service_module: &service_module,
            }
            .render()?,
            PaginationStrategy::Cursor => CursorRoute {
                route_name,
                response_class: &response_class,
                service_module: &service_module,
            }
            .render()?,
            PaginationStrategy::None => UnpagedRoute {
                route_name,
                response_class: &response_class,
                service_module: &service_module,
            }
            .render()?,
        };
        Ok(rendered)
    }
}

impl fmt::Display for PaginationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaginationStrategy {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self> {
        PaginationStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| GenerateError::InvalidPaginationStrategy {
                value: s.to_string(),
            })
    }
}
