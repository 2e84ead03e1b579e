//! Component-level generation: one entity, one to four artifacts.
//!
//! A request is validated and rendered in full before the filesystem is
//! touched. All target paths are then checked together, and the request
//! fails without writing anything if any of them already exists.

use std::fmt;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::entity::{ArtifactKind, ArtifactRequest, EntitySpec};
use super::fields::parse_fields;
use super::naming::EntityNames;
use super::pagination::PaginationStrategy;
use super::templates::compose;
use super::writer::{find_conflicts, write_new};
use crate::error::{GenerateError, Result};

/// What `fastinit new` was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Model,
    Schema,
    Service,
    Route,
    /// Model, schema, service and route for one entity.
    Crud,
}

impl ComponentKind {
    /// Artifacts this kind expands to, in write order.
    #[must_use]
    pub fn artifacts(self) -> &'static [ArtifactKind] {
        match self {
            ComponentKind::Model => &[ArtifactKind::Model],
            ComponentKind::Schema => &[ArtifactKind::Schema],
            ComponentKind::Service => &[ArtifactKind::Service],
            ComponentKind::Route => &[ArtifactKind::Route],
            ComponentKind::Crud => &[
                ArtifactKind::Model,
                ArtifactKind::Schema,
                ArtifactKind::Service,
                ArtifactKind::Route,
            ],
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Model => "model",
            ComponentKind::Schema => "schema",
            ComponentKind::Service => "service",
            ComponentKind::Route => "route",
            ComponentKind::Crud => "crud",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component-level request as received from the command surface.
///
/// `pagination` is kept as the raw string so that an invalid value is
/// reported by the engine itself.
#[derive(Debug, Clone)]
pub struct ComponentRequest {
    pub kind: ComponentKind,
    pub entity_name: String,
    pub field_spec: String,
    pub project_dir: PathBuf,
    pub pagination: String,
    /// `--model` for services, `--service` for routes. Ignored otherwise.
    pub reference: Option<String>,
}

impl ComponentRequest {
    #[must_use]
    pub fn new(kind: ComponentKind, entity_name: impl Into<String>, project_dir: impl Into<PathBuf>) -> Self {
        ComponentRequest {
            kind,
            entity_name: entity_name.into(),
            field_spec: String::new(),
            project_dir: project_dir.into(),
            pagination: PaginationStrategy::default().as_str().to_string(),
            reference: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, field_spec: impl Into<String>) -> Self {
        self.field_spec = field_spec.into();
        self
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: impl Into<String>) -> Self {
        self.pagination = pagination.into();
        self
    }

    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Resolve the entity the request is about.
    ///
    /// Services name their entity through `--model` or a `Service` suffix;
    /// routes through `--service` or a plural route segment.
    fn entity_names(&self) -> Result<EntityNames> {
        let reference = self.reference.as_deref().filter(|r| !r.trim().is_empty());
        match (self.kind, reference) {
            (ComponentKind::Service, Some(model)) => EntityNames::new(model),
            (ComponentKind::Service, None) => EntityNames::from_service_name(&self.entity_name),
            (ComponentKind::Route, Some(service)) => EntityNames::from_service_name(service),
            (ComponentKind::Route, None) => EntityNames::from_route_name(&self.entity_name),
            _ => EntityNames::new(&self.entity_name),
        }
    }
}

/// A fully rendered artifact that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub contents: String,
}

/// Validate `request` and render every artifact without touching the
/// filesystem.
///
/// # Errors
///
/// [`GenerateError::InvalidPaginationStrategy`],
/// [`GenerateError::InvalidEntityName`], field-spec errors and rendering
/// errors.
pub fn plan_component(request: &ComponentRequest) -> Result<Vec<PlannedArtifact>> {
    let pagination: PaginationStrategy = request.pagination.parse()?;
    let entity = EntitySpec::new(request.entity_names()?, parse_fields(&request.field_spec)?);
    debug!(
        kind = %request.kind,
        entity = %entity.names.class_name,
        fields = entity.fields.len(),
        pagination = %pagination,
        "planning component"
    );

    request
        .kind
        .artifacts()
        .iter()
        .map(|&kind| {
            let artifact = ArtifactRequest {
                kind,
                entity: entity.clone(),
                pagination,
                project_dir: request.project_dir.clone(),
            };
            Ok(PlannedArtifact {
                kind,
                path: artifact.target_path(),
                contents: compose(&artifact)?,
            })
        })
        .collect()
}

/// Generate the artifacts for `request` and return the created paths.
///
/// # Errors
///
/// Everything [`plan_component`] reports, then
/// [`GenerateError::TargetAlreadyExists`] naming every conflicting path. On
/// either, nothing has been written.
pub fn generate_component(request: &ComponentRequest) -> Result<Vec<PathBuf>> {
    let plan = plan_component(request)?;

    let conflicts = find_conflicts(plan.iter().map(|a| a.path.as_path()));
    if !conflicts.is_empty() {
        warn!(count = conflicts.len(), "component targets already exist");
        return Err(GenerateError::TargetAlreadyExists { paths: conflicts });
    }

    let mut created = Vec::with_capacity(plan.len());
    for artifact in plan {
        write_new(&artifact.path, &artifact.contents)?;
        created.push(artifact.path);
    }
    Ok(created)
}
