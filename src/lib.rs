//! # FastInit
//!
//! **FastInit** scaffolds FastAPI services backed by SQLAlchemy and Pydantic,
//! and grows them one entity at a time.
//!
//! ## Overview
//!
//! A project is created once from a [`ProjectConfiguration`]. Components are
//! then added per entity: a model, a schema, a service, a route, or all four
//! at once. Every component request is validated and rendered completely
//! before anything is written, and a request whose targets already exist
//! fails without touching the tree.
//!
//! ## Architecture
//!
//! - **[`generator`]** - field parsing, name derivation, pagination
//!   strategies, template rendering and file materialization
//! - **[`config`]** - project configuration and config-file loading
//! - **[`error`]** - the [`GenerateError`] taxonomy
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `fastinit` command surface
//!
//! ## Example
//!
//! ```rust,ignore
//! use fastinit::{generate_component, generate_project, ComponentKind, ComponentRequest, ProjectConfiguration};
//!
//! let mut config = ProjectConfiguration::new("shop", ".");
//! config.enable_persistence = true;
//! generate_project(&config)?;
//!
//! let request = ComponentRequest::new(ComponentKind::Crud, "Product", "shop")
//!     .with_fields("name:str,price:float,description:text?")
//!     .with_pagination("cursor");
//! generate_component(&request)?;
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;

pub use config::{PersistenceEngine, ProjectConfiguration};
pub use error::{GenerateError, Result};
pub use generator::{
    generate_component, generate_project, plan_component, ComponentKind, ComponentRequest,
    PaginationStrategy,
};
