use std::fmt;
use std::path::{Path, PathBuf};

use super::fields::{parse_fields, FieldDescriptor};
use super::naming::EntityNames;
use super::pagination::PaginationStrategy;
use crate::error::Result;

/// A logical record type: derived names plus ordered fields.
///
/// Built fresh for every component request and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpec {
    pub names: EntityNames,
    pub fields: Vec<FieldDescriptor>,
}

impl EntitySpec {
    #[must_use]
    pub fn new(names: EntityNames, fields: Vec<FieldDescriptor>) -> Self {
        EntitySpec { names, fields }
    }

    /// Parse `name` and `field_spec` into an entity.
    ///
    /// # Errors
    ///
    /// Entity-name and field-spec validation errors.
    pub fn parse(name: &str, field_spec: &str) -> Result<Self> {
        Ok(EntitySpec {
            names: EntityNames::new(name)?,
            fields: parse_fields(field_spec)?,
        })
    }
}

/// Kind of a single generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Model,
    Schema,
    Service,
    Route,
}

impl ArtifactKind {
    /// Path of the artifact relative to the project root.
    #[must_use]
    pub fn relative_path(self, names: &EntityNames) -> PathBuf {
        let app = Path::new("app");
        match self {
            ArtifactKind::Model => app.join("models").join(format!("{}.py", names.snake_name)),
            ArtifactKind::Schema => app.join("schemas").join(format!("{}.py", names.snake_name)),
            ArtifactKind::Service => app
                .join("services")
                .join(format!("{}.py", names.service_module())),
            ArtifactKind::Route => app
                .join("api")
                .join("routes")
                .join(format!("{}.py", names.route_name)),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Model => "model",
            ArtifactKind::Schema => "schema",
            ArtifactKind::Service => "service",
            ArtifactKind::Route => "route",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of generation, mapping 1:1 to an output file.
#[derive(Debug, Clone)]
pub struct ArtifactRequest {
    pub kind: ArtifactKind,
    pub entity: EntitySpec,
    /// Ignored for models and schemas.
    pub pagination: PaginationStrategy,
    pub project_dir: PathBuf,
}

impl ArtifactRequest {
    #[must_use]
    pub fn target_path(&self) -> PathBuf {
        self.project_dir
            .join(self.kind.relative_path(&self.entity.names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths() {
        let names = EntityNames::new("Product").unwrap();
        assert_eq!(
            ArtifactKind::Model.relative_path(&names),
            Path::new("app/models/product.py")
        );
        assert_eq!(
            ArtifactKind::Schema.relative_path(&names),
            Path::new("app/schemas/product.py")
        );
        assert_eq!(
            ArtifactKind::Service.relative_path(&names),
            Path::new("app/services/product_service.py")
        );
        assert_eq!(
            ArtifactKind::Route.relative_path(&names),
            Path::new("app/api/routes/products.py")
        );
    }

    #[test]
    fn test_target_path_is_rooted_in_project() {
        let request = ArtifactRequest {
            kind: ArtifactKind::Model,
            entity: EntitySpec::parse("TestModel", "name:str").unwrap(),
            pagination: PaginationStrategy::default(),
            project_dir: PathBuf::from("/tmp/demo"),
        };
        assert_eq!(
            request.target_path(),
            Path::new("/tmp/demo/app/models/test_model.py")
        );
    }
}
