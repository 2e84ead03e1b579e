//! # Generator Module
//!
//! Scaffolds FastAPI services and the components that live inside them.
//!
//! ## Overview
//!
//! Two entry points cover the two kinds of request:
//!
//! - [`generate_project`] creates a full project skeleton from a
//!   [`ProjectConfiguration`](crate::config::ProjectConfiguration)
//! - [`generate_component`] adds a model, schema, service, route, or all four
//!   (`crud`) for one entity to an existing project
//!
//! ## Pipeline
//!
//! ```text
//! field spec ──► fields ──┐
//! entity name ─► naming ──┼─► templates (askama) ─► writer ─► filesystem
//! pagination ──► pagination┘
//! ```
//!
//! 1. **fields** parses `"name:str,price:float"` into ordered descriptors
//! 2. **naming** derives class, module, table and route names
//! 3. **pagination** contributes the `get_all` service function and list
//!    handler for the selected strategy
//! 4. **templates** renders each artifact from compile-time templates in
//!    `templates/`; **static_files** renders non-Python boilerplate from
//!    `static/`
//! 5. **writer** checks for conflicts and writes files
//!
//! ## Generated Structure
//!
//! ```text
//! my-api/
//! ├── app/
//! │   ├── main.py
//! │   ├── api/routes/       # health.py, <plural>.py
//! │   ├── core/             # config.py, security.py, logging.py
//! │   ├── db/               # session.py, base.py (persistence only)
//! │   ├── models/
//! │   ├── schemas/
//! │   └── services/
//! ├── alembic/              # persistence only
//! ├── tests/
//! ├── requirements.txt
//! └── pyproject.toml
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use fastinit::generator::{generate_component, ComponentKind, ComponentRequest};
//!
//! let request = ComponentRequest::new(ComponentKind::Crud, "Product", "my-api")
//!     .with_fields("name:str,price:float")
//!     .with_pagination("cursor");
//! let created = generate_component(&request)?;
//! ```

mod component;
mod entity;
mod fields;
mod naming;
mod pagination;
mod project;
mod static_files;
mod templates;
mod writer;

pub use component::{generate_component, plan_component, ComponentKind, ComponentRequest, PlannedArtifact};
pub use entity::{ArtifactKind, ArtifactRequest, EntitySpec};
pub use fields::{parse_fields, FieldDescriptor, FieldType};
pub use naming::{pluralize, EntityNames};
pub use pagination::PaginationStrategy;
pub use project::generate_project;
pub use static_files::render_boilerplate;
pub use templates::{compose, render_project_modules};
