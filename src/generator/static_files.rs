//! Project boilerplate that is not Python code: dependency manifests, docs,
//! container files and the Alembic scaffolding.
//!
//! Templated files are rendered with `minijinja` from sources embedded at
//! compile time; the rest are copied verbatim.

use minijinja::Environment;
use serde::Serialize;

use super::templates::with_trailing_newline;
use crate::config::ProjectConfiguration;
use crate::error::Result;

/// Rendering context shared by every boilerplate template.
#[derive(Debug, Serialize)]
struct BoilerplateContext<'a> {
    project_name: &'a str,
    python_version: &'a str,
    use_db: bool,
    db_type: &'static str,
    use_jwt: bool,
    use_logging: bool,
    use_docker: bool,
    database_name: String,
    database_url: String,
    compose_database_url: String,
}

impl<'a> From<&'a ProjectConfiguration> for BoilerplateContext<'a> {
    fn from(config: &'a ProjectConfiguration) -> Self {
        let database_name = config.database_name();
        BoilerplateContext {
            project_name: &config.project_name,
            python_version: &config.runtime_version,
            use_db: config.enable_persistence,
            db_type: config.persistence_engine.as_str(),
            use_jwt: config.enable_auth,
            use_logging: config.enable_logging,
            use_docker: config.enable_containerization,
            database_url: config.persistence_engine.database_url(&database_name),
            compose_database_url: config
                .persistence_engine
                .compose_database_url(&database_name),
            database_name,
        }
    }
}

// (output path, template name, source)
const ALWAYS: &[(&str, &str, &str)] = &[
    ("requirements.txt", "requirements.txt", include_str!("../../static/requirements.txt.j2")),
    ("pyproject.toml", "pyproject.toml", include_str!("../../static/pyproject.toml.j2")),
    ("README.md", "README.md", include_str!("../../static/README.md.j2")),
    (".env.example", "env.example", include_str!("../../static/env.example.j2")),
];

const CONTAINER: &[(&str, &str, &str)] = &[
    ("Dockerfile", "Dockerfile", include_str!("../../static/Dockerfile.j2")),
    ("docker-compose.yml", "docker-compose.yml", include_str!("../../static/docker-compose.yml.j2")),
];

const GITIGNORE: &str = include_str!("../../static/gitignore");
const DOCKERIGNORE: &str = include_str!("../../static/dockerignore");
const ALEMBIC_INI: &str = include_str!("../../static/alembic.ini");
const ALEMBIC_SCRIPT: &str = include_str!("../../static/script.py.mako");
const ALEMBIC_README: &str = include_str!("../../static/alembic_README.md");

/// Boilerplate files for `config`, as `(relative path, contents)` pairs.
///
/// # Errors
///
/// Returns [`crate::GenerateError::StaticRender`] if a template fails to render.
pub fn render_boilerplate(config: &ProjectConfiguration) -> Result<Vec<(String, String)>> {
    let mut env = Environment::new();
    let mut templated = ALWAYS.to_vec();
    if config.enable_containerization {
        templated.extend_from_slice(CONTAINER);
    }
    for &(_, name, source) in &templated {
        env.add_template(name, source)?;
    }

    let ctx = BoilerplateContext::from(config);
    let mut files = Vec::new();
    for &(path, name, _) in &templated {
        let rendered = env.get_template(name)?.render(&ctx)?;
        files.push((path.to_string(), rendered));
    }

    files.push((".gitignore".to_string(), GITIGNORE.to_string()));
    if config.enable_containerization {
        files.push((".dockerignore".to_string(), DOCKERIGNORE.to_string()));
    }
    if config.enable_persistence {
        files.push(("alembic.ini".to_string(), ALEMBIC_INI.to_string()));
        files.push(("alembic/script.py.mako".to_string(), ALEMBIC_SCRIPT.to_string()));
        files.push(("alembic/README.md".to_string(), ALEMBIC_README.to_string()));
    }

    Ok(files
        .into_iter()
        .map(|(path, text)| (path, with_trailing_newline(text)))
        .collect())
}
