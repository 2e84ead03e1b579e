//! Project-level generation.
//!
//! Every file is rendered up front, so template failures surface before the
//! project directory is created. Writes are strict and are not rolled back if
//! the filesystem fails part-way through.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::static_files::render_boilerplate;
use super::templates::render_project_modules;
use super::writer::{ensure_dir, write_new};
use crate::config::ProjectConfiguration;
use crate::error::{GenerateError, Result};

/// Python packages present in every project.
const PACKAGES: &[&str] = &[
    "app",
    "app/api",
    "app/api/routes",
    "app/core",
    "app/models",
    "app/schemas",
    "app/services",
    "tests",
];

/// Directory that receives Alembic revisions; created empty.
const MIGRATION_VERSIONS: &str = "alembic/versions";

/// Generate a new project and return every created file, plus the empty
/// migration versions directory when persistence is enabled.
///
/// # Errors
///
/// [`GenerateError::Config`] for an unusable project name,
/// [`GenerateError::OutputDirectoryNotEmpty`] if the project directory already
/// has content, and rendering or filesystem errors.
pub fn generate_project(config: &ProjectConfiguration) -> Result<Vec<PathBuf>> {
    config.validate()?;
    let root = config.project_path();
    if !is_empty_or_missing(&root)? {
        return Err(GenerateError::OutputDirectoryNotEmpty { path: root });
    }

    let mut packages: Vec<&str> = PACKAGES.to_vec();
    if config.enable_persistence {
        packages.push("app/db");
    }

    let mut files: Vec<(String, String)> = packages
        .iter()
        .map(|pkg| (format!("{pkg}/__init__.py"), String::new()))
        .collect();
    files.extend(render_project_modules(config)?);
    files.extend(render_boilerplate(config)?);
    debug!(
        project = %config.project_name,
        files = files.len(),
        persistence = config.enable_persistence,
        engine = %config.persistence_engine,
        auth = config.enable_auth,
        logging = config.enable_logging,
        containers = config.enable_containerization,
        "rendered project"
    );

    ensure_dir(&root)?;
    let mut created = Vec::with_capacity(files.len() + 1);
    for (relative, contents) in &files {
        let path = root.join(relative);
        write_new(&path, contents)?;
        created.push(path);
    }
    if config.enable_persistence {
        let versions = root.join(MIGRATION_VERSIONS);
        ensure_dir(&versions)?;
        created.push(versions);
    }

    info!(path = %root.display(), files = created.len(), "project generated");
    Ok(created)
}

fn is_empty_or_missing(dir: &Path) -> Result<bool> {
    if !dir.exists() {
        return Ok(true);
    }
    if !dir.is_dir() {
        return Ok(false);
    }
    let mut entries = fs::read_dir(dir).map_err(|e| GenerateError::io(dir, e))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_project() {
        let dir = TempDir::new().unwrap();
        let config = ProjectConfiguration::new("demo", dir.path());
        let created = generate_project(&config).unwrap();
        let root = dir.path().join("demo");
        for expected in ["app/main.py", "app/schemas/__init__.py", "tests/test_health.py", ".gitignore"] {
            assert!(root.join(expected).is_file(), "missing {expected}");
            assert!(created.contains(&root.join(expected)));
        }
        assert!(!root.join("app/db").exists());
        assert!(!root.join("alembic").exists());
    }

    #[test]
    fn test_existing_empty_directory_is_accepted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("demo")).unwrap();
        assert!(generate_project(&ProjectConfiguration::new("demo", dir.path())).is_ok());
    }

    #[test]
    fn test_non_empty_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("demo");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("notes.txt"), "keep me\n").unwrap();

        let err = generate_project(&ProjectConfiguration::new("demo", dir.path())).unwrap_err();
        assert_eq!(err.kind(), "output_directory_not_empty");
        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
    }

    #[test]
    fn test_persistence_adds_migration_tooling() {
        let dir = TempDir::new().unwrap();
        let mut config = ProjectConfiguration::new("demo", dir.path());
        config.enable_persistence = true;
        generate_project(&config).unwrap();
        let root = dir.path().join("demo");
        assert!(root.join("app/db/session.py").is_file());
        assert!(root.join("app/db/__init__.py").is_file());
        assert!(root.join("alembic/env.py").is_file());
        assert!(root.join("alembic/versions").is_dir());
        assert_eq!(fs::read_dir(root.join("alembic/versions")).unwrap().count(), 0);
    }
}
