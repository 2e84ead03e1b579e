use std::collections::BTreeSet;

use askama::Template;

use super::entity::{ArtifactKind, ArtifactRequest, EntitySpec};
use super::fields::FieldDescriptor;
use crate::config::{PersistenceEngine, ProjectConfiguration};
use crate::error::Result;

/// Column definition for a generated SQLAlchemy model
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub name: String,
    /// SQLAlchemy column type (e.g. `String`, `Float`)
    pub column_type: &'static str,
    /// Python literal for the `nullable=` argument
    pub nullable: &'static str,
}

/// Field declaration for a generated Pydantic schema
#[derive(Debug, Clone)]
pub struct SchemaField {
    pub name: String,
    /// Annotation and default in the `Base` class, e.g. `str` or `Optional[str] = None`
    pub base_decl: String,
    /// Declaration in the `Update` class, where every field is optional
    pub update_decl: String,
}

impl From<&FieldDescriptor> for ColumnDef {
    fn from(field: &FieldDescriptor) -> Self {
        ColumnDef {
            name: field.name.clone(),
            column_type: field.column_type(),
            nullable: if field.optional { "True" } else { "False" },
        }
    }
}

impl From<&FieldDescriptor> for SchemaField {
    fn from(field: &FieldDescriptor) -> Self {
        let optional = format!("Optional[{}] = None", field.annotation());
        SchemaField {
            name: field.name.clone(),
            base_decl: if field.optional {
                optional.clone()
            } else {
                field.annotation().to_string()
            },
            update_decl: optional,
        }
    }
}

/// Template data for a SQLAlchemy model module
#[derive(Template)]
#[template(path = "component/model.py.txt", escape = "none")]
pub struct ModelTemplateData {
    pub class_name: String,
    pub table_name: String,
    /// Comma-separated `sqlalchemy` imports
    pub column_imports: String,
    pub columns: Vec<ColumnDef>,
}

/// Template data for a Pydantic schema module (`Base`, `Create`, `Update`, `Response`)
#[derive(Template)]
#[template(path = "component/schema.py.txt", escape = "none")]
pub struct SchemaTemplateData {
    pub base_class: String,
    pub create_class: String,
    pub update_class: String,
    pub response_class: String,
    /// Comma-separated `datetime` imports, empty when none are needed
    pub datetime_imports: String,
    pub fields: Vec<SchemaField>,
}

/// Template data for a service module
#[derive(Template)]
#[template(path = "component/service.py.txt", escape = "none")]
pub struct ServiceTemplateData {
    pub class_name: String,
    pub snake_name: String,
    pub create_class: String,
    pub update_class: String,
    /// `get_all` function supplied by the pagination strategy
    pub get_all: String,
}

/// Template data for a router module
#[derive(Template)]
#[template(path = "component/route.py.txt", escape = "none")]
pub struct RouteTemplateData {
    pub class_name: String,
    pub snake_name: String,
    pub route_name: String,
    pub create_class: String,
    pub update_class: String,
    pub response_class: String,
    pub service_module: String,
    pub typing_imports: &'static str,
    /// List handler supplied by the pagination strategy
    pub list_handler: String,
}

#[derive(Template)]
#[template(path = "project/main.py.txt", escape = "none")]
pub struct MainPyTemplate {
    pub use_logging: bool,
}

#[derive(Template)]
#[template(path = "project/config.py.txt", escape = "none")]
pub struct ConfigPyTemplate {
    pub project_name: String,
    pub use_db: bool,
    pub database_url: String,
    pub use_jwt: bool,
    pub use_logging: bool,
}

#[derive(Template)]
#[template(path = "project/session.py.txt", escape = "none")]
pub struct SessionPyTemplate {
    pub is_sqlite: bool,
}

#[derive(Template)]
#[template(path = "project/base.py.txt", escape = "none")]
pub struct BasePyTemplate;

#[derive(Template)]
#[template(path = "project/security.py.txt", escape = "none")]
pub struct SecurityPyTemplate;

#[derive(Template)]
#[template(path = "project/logging.py.txt", escape = "none")]
pub struct LoggingPyTemplate;

#[derive(Template)]
#[template(path = "project/health.py.txt", escape = "none")]
pub struct HealthPyTemplate;

#[derive(Template)]
#[template(path = "project/test_health.py.txt", escape = "none")]
pub struct TestHealthPyTemplate;

#[derive(Template)]
#[template(path = "project/alembic_env.py.txt", escape = "none")]
pub struct AlembicEnvTemplate;

/// Render the complete text of one artifact.
///
/// # Errors
///
/// Propagates template rendering failures.
pub fn compose(request: &ArtifactRequest) -> Result<String> {
    let rendered = match request.kind {
        ArtifactKind::Model => render_model(&request.entity)?,
        ArtifactKind::Schema => render_schema(&request.entity)?,
        ArtifactKind::Service => {
            let names = &request.entity.names;
            ServiceTemplateData {
                class_name: names.class_name.clone(),
                snake_name: names.snake_name.clone(),
                create_class: names.create_class(),
                update_class: names.update_class(),
                get_all: request
                    .pagination
                    .service_fragment(names)?
                    .trim_end()
                    .to_string(),
            }
            .render()?
        }
        ArtifactKind::Route => {
            let names = &request.entity.names;
            RouteTemplateData {
                class_name: names.class_name.clone(),
                snake_name: names.snake_name.clone(),
                route_name: names.route_name.clone(),
                create_class: names.create_class(),
                update_class: names.update_class(),
                response_class: names.response_class(),
                service_module: names.service_module(),
                typing_imports: request.pagination.route_typing_imports(),
                list_handler: request
                    .pagination
                    .route_fragment(names)?
                    .trim_end()
                    .to_string(),
            }
            .render()?
        }
    };
    Ok(with_trailing_newline(rendered))
}

fn render_model(entity: &EntitySpec) -> Result<String> {
    // Column and Integer back the implicit primary key.
    let mut imports: BTreeSet<&str> = ["Column", "Integer"].into_iter().collect();
    imports.extend(entity.fields.iter().map(FieldDescriptor::column_type));

    Ok(ModelTemplateData {
        class_name: entity.names.class_name.clone(),
        table_name: entity.names.table_name.clone(),
        column_imports: imports.into_iter().collect::<Vec<_>>().join(", "),
        columns: entity.fields.iter().map(ColumnDef::from).collect(),
    }
    .render()?)
}

fn render_schema(entity: &EntitySpec) -> Result<String> {
    let datetime_imports: BTreeSet<&str> = entity
        .fields
        .iter()
        .filter_map(|f| f.type_tag.datetime_import())
        .collect();
    let names = &entity.names;

    Ok(SchemaTemplateData {
        base_class: names.base_class(),
        create_class: names.create_class(),
        update_class: names.update_class(),
        response_class: names.response_class(),
        datetime_imports: datetime_imports.into_iter().collect::<Vec<_>>().join(", "),
        fields: entity.fields.iter().map(SchemaField::from).collect(),
    }
    .render()?)
}

/// Rendered Python modules for a project, keyed by path relative to the
/// project root.
///
/// # Errors
///
/// Propagates template rendering failures.
pub fn render_project_modules(config: &ProjectConfiguration) -> Result<Vec<(String, String)>> {
    let mut files = vec![
        (
            "app/main.py".to_string(),
            MainPyTemplate {
                use_logging: config.enable_logging,
            }
            .render()?,
        ),
        (
            "app/core/config.py".to_string(),
            ConfigPyTemplate {
                project_name: config.project_name.clone(),
                use_db: config.enable_persistence,
                database_url: config.database_url(),
                use_jwt: config.enable_auth,
                use_logging: config.enable_logging,
            }
            .render()?,
        ),
        ("app/api/routes/health.py".to_string(), HealthPyTemplate.render()?),
        ("tests/test_health.py".to_string(), TestHealthPyTemplate.render()?),
    ];

    if config.enable_persistence {
        files.push((
            "app/db/session.py".to_string(),
            SessionPyTemplate {
                is_sqlite: config.persistence_engine == PersistenceEngine::Sqlite,
            }
            .render()?,
        ));
        files.push(("app/db/base.py".to_string(), BasePyTemplate.render()?));
        files.push(("alembic/env.py".to_string(), AlembicEnvTemplate.render()?));
    }
    if config.enable_auth {
        files.push(("app/core/security.py".to_string(), SecurityPyTemplate.render()?));
    }
    if config.enable_logging {
        files.push(("app/core/logging.py".to_string(), LoggingPyTemplate.render()?));
    }

    Ok(files
        .into_iter()
        .map(|(path, text)| (path, with_trailing_newline(text)))
        .collect())
}

pub(crate) fn with_trailing_newline(mut text: String) -> String {
    let trimmed = text.trim_end_matches('\n').len();
    text.truncate(trimmed);
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::naming::EntityNames;
    use crate::generator::pagination::PaginationStrategy;
    use std::path::PathBuf;

    fn request(kind: ArtifactKind, name: &str, fields: &str) -> ArtifactRequest {
        ArtifactRequest {
            kind,
            entity: EntitySpec::parse(name, fields).unwrap(),
            pagination: PaginationStrategy::LimitOffset,
            project_dir: PathBuf::from("."),
        }
    }

    /// Lines of the class body following `class <name>(`.
    fn class_body<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
        let header = format!("class {name}(");
        text.lines()
            .skip_while(|l| !l.starts_with(&header))
            .skip(1)
            .take_while(|l| l.starts_with("    ") || l.is_empty())
            .filter(|l| !l.trim().is_empty())
            .map(str::trim)
            .collect()
    }

    #[test]
    fn test_model_columns_follow_field_order() {
        let text = compose(&request(ArtifactKind::Model, "Product", "name:str,price:float,notes:text?")).unwrap();
        assert!(text.contains("from sqlalchemy import Column, Float, Integer, String, Text\n"));
        assert!(text.contains("class Product(Base):"));
        assert!(text.contains("__tablename__ = \"products\""));
        assert_eq!(
            class_body(&text, "Product"),
            [
                "__tablename__ = \"products\"",
                "id = Column(Integer, primary_key=True, index=True)",
                "name = Column(String, nullable=False)",
                "price = Column(Float, nullable=False)",
                "notes = Column(Text, nullable=True)",
            ]
        );
    }

    #[test]
    fn test_schema_base_holds_declared_fields() {
        let text = compose(&request(ArtifactKind::Schema, "Product", "name:str,price:float")).unwrap();
        assert_eq!(class_body(&text, "ProductBase"), ["name: str", "price: float"]);
        assert_eq!(class_body(&text, "ProductCreate"), ["pass"]);
        assert_eq!(
            class_body(&text, "ProductUpdate"),
            ["name: Optional[str] = None", "price: Optional[float] = None"]
        );
        assert_eq!(
            class_body(&text, "ProductResponse"),
            ["id: int", "model_config = ConfigDict(from_attributes=True)"]
        );
        assert!(text.contains("from pydantic import BaseModel, ConfigDict"));
        assert!(!text.contains("from datetime"));
    }

    #[test]
    fn test_schema_without_fields_is_valid() {
        let text = compose(&request(ArtifactKind::Schema, "Tag", "")).unwrap();
        assert_eq!(class_body(&text, "TagBase"), ["pass"]);
        assert_eq!(class_body(&text, "TagUpdate"), ["pass"]);
    }

    #[test]
    fn test_schema_datetime_imports() {
        let text = compose(&request(ArtifactKind::Schema, "Event", "starts:datetime,day:date?")).unwrap();
        assert!(text.starts_with("from datetime import date, datetime\nfrom typing import Optional\n"));
        assert!(text.contains("day: Optional[date] = None"));
    }

    #[test]
    fn test_service_functions() {
        let text = compose(&request(ArtifactKind::Service, "Product", "")).unwrap();
        for def in ["def create(", "def get(", "def get_all(", "def update(", "def delete("] {
            assert!(text.contains(def), "missing {def}");
        }
        assert!(text.contains("from models.product import Product"));
        assert!(text.contains("from schemas.product import ProductCreate, ProductUpdate"));
        assert!(text.contains("\n\n\ndef get_all(db: Session, skip: int = 0, limit: int = 100)"));
    }

    #[test]
    fn test_route_endpoints() {
        let text = compose(&request(ArtifactKind::Route, "Product", "")).unwrap();
        assert!(text.contains("router = APIRouter(prefix=\"/products\", tags=[\"products\"])"));
        assert!(text.contains("from schemas.product import ProductCreate, ProductResponse, ProductUpdate"));
        assert!(text.contains("response_model=List[ProductResponse]"));
        assert!(text.contains("response_model=ProductResponse"));
        assert!(text.contains("from typing import List\n"));
        for endpoint in ["@router.post(", "@router.get(\"/\"", "@router.get(\"/{item_id}\"", "@router.put(", "@router.delete("] {
            assert!(text.contains(endpoint), "missing {endpoint}");
        }
    }

    #[test]
    fn test_route_delegates_with_strategy_parameters() {
        let mut req = request(ArtifactKind::Route, "Order", "");
        req.pagination = PaginationStrategy::Cursor;
        let text = compose(&req).unwrap();
        assert!(text.contains("from typing import List, Optional"));
        assert!(text.contains("order_service.get_all(db, cursor=cursor, limit=limit)"));
        assert!(!text.contains("skip"));
    }

    #[test]
    fn test_pagination_ignored_for_model_and_schema() {
        for kind in [ArtifactKind::Model, ArtifactKind::Schema] {
            let mut req = request(kind, "Product", "name:str");
            let default = compose(&req).unwrap();
            req.pagination = PaginationStrategy::Cursor;
            assert_eq!(compose(&req).unwrap(), default);
        }
    }

    #[test]
    fn test_composition_is_deterministic() {
        let req = request(ArtifactKind::Route, "Product", "name:str");
        assert_eq!(compose(&req).unwrap(), compose(&req).unwrap());
        let names = EntityNames::new("Product").unwrap();
        assert_eq!(req.entity.names, names);
    }

    #[test]
    fn test_project_modules_feature_gating() {
        let mut config = ProjectConfiguration::new("demo", ".");
        let paths = |c: &ProjectConfiguration| -> Vec<String> {
            render_project_modules(c).unwrap().into_iter().map(|(p, _)| p).collect()
        };
        let base = paths(&config);
        assert!(base.contains(&"app/main.py".to_string()));
        assert!(!base.iter().any(|p| p.starts_with("app/db") || p.starts_with("alembic")));

        config.enable_persistence = true;
        config.enable_auth = true;
        config.enable_logging = true;
        let full = paths(&config);
        for expected in ["app/db/session.py", "app/db/base.py", "alembic/env.py", "app/core/security.py", "app/core/logging.py"] {
            assert!(full.contains(&expected.to_string()), "missing {expected}");
        }
    }

    #[test]
    fn test_config_module_carries_database_url() {
        let mut config = ProjectConfiguration::new("shop-api", ".");
        config.enable_persistence = true;
        config.persistence_engine = PersistenceEngine::Sqlite;
        let modules = render_project_modules(&config).unwrap();
        let (_, settings) = modules.iter().find(|(p, _)| p == "app/core/config.py").unwrap();
        assert!(settings.contains("DATABASE_URL: str = \"sqlite:///./shop_api.db\""));
        let (_, session) = modules.iter().find(|(p, _)| p == "app/db/session.py").unwrap();
        assert!(session.contains("check_same_thread"));
    }

    #[test]
    fn test_trailing_newline_normalized() {
        assert_eq!(with_trailing_newline("a\n\n".into()), "a\n");
        assert_eq!(with_trailing_newline("a".into()), "a\n");
    }
}
