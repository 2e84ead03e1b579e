use heck::{ToSnakeCase, ToUpperCamelCase};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GenerateError, Result};

static ENTITY_NAME: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap()
});

/// Already a Python class name; used verbatim so acronyms survive.
static CLASS_NAME: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap()
});

const SERVICE_SUFFIX: &str = "Service";

/// Every name derived from one entity name.
///
/// Derivation is a pure function of the input, so artifacts generated in
/// separate calls for the same entity agree on class, module, table and route
/// names without any shared registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityNames {
    /// `Product`, `OrderItem`
    pub class_name: String,
    /// `product`, `order_item`
    pub snake_name: String,
    /// `products`, `order_items`
    pub route_name: String,
    /// `products`, `order_items`
    pub table_name: String,
}

impl EntityNames {
    /// # Errors
    ///
    /// [`GenerateError::InvalidEntityName`] when `name` is empty or not an
    /// identifier.
    pub fn new(name: &str) -> Result<Self> {
        let name = name.trim();
        if !ENTITY_NAME.is_match(name) {
            return Err(GenerateError::InvalidEntityName {
                name: name.to_string(),
                reason: "expected a letter followed by letters, digits or `_`".to_string(),
            });
        }
        let class_name = if CLASS_NAME.is_match(name) {
            name.to_string()
        } else {
            name.to_upper_camel_case()
        };
        let snake_name = class_name.to_snake_case();
        let route_name = pluralize(&snake_name);
        Ok(EntityNames {
            table_name: route_name.clone(),
            class_name,
            snake_name,
            route_name,
        })
    }

    /// Entity named by a service, e.g. `UserService` → `User`.
    ///
    /// # Errors
    ///
    /// See [`EntityNames::new`].
    pub fn from_service_name(service: &str) -> Result<Self> {
        let service = service.trim();
        let entity = service
            .strip_suffix(SERVICE_SUFFIX)
            .filter(|s| !s.is_empty())
            .unwrap_or(service);
        Self::new(entity)
    }

    /// Entity behind a route NAME.
    ///
    /// An all-lowercase NAME is a plural route segment and loses one trailing
    /// `s` (`users` → `User`, `categories` → `Categorie`, which pluralizes
    /// back to `categories`). Any other NAME is the entity itself, so
    /// `Address` names the same entity as `crud Address`.
    ///
    /// # Errors
    ///
    /// See [`EntityNames::new`].
    pub fn from_route_name(route: &str) -> Result<Self> {
        let route = route.trim();
        if route.chars().any(|c| c.is_ascii_uppercase()) {
            return Self::new(route);
        }
        let entity = route
            .strip_suffix('s')
            .filter(|s| !s.is_empty())
            .unwrap_or(route);
        Self::new(entity)
    }

    #[must_use]
    pub fn base_class(&self) -> String {
        format!("{}Base", self.class_name)
    }

    #[must_use]
    pub fn create_class(&self) -> String {
        format!("{}Create", self.class_name)
    }

    #[must_use]
    pub fn update_class(&self) -> String {
        format!("{}Update", self.class_name)
    }

    #[must_use]
    pub fn response_class(&self) -> String {
        format!("{}Response", self.class_name)
    }

    /// Module name of the generated service, e.g. `product_service`.
    #[must_use]
    pub fn service_module(&self) -> String {
        format!("{}_service", self.snake_name)
    }
}

/// Append `s`. Irregular plurals are not handled.
#[must_use]
pub fn pluralize(word: &str) -> String {
    format!("{word}s")
}
