use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{PersistenceEngine, ProjectConfiguration};
use crate::generator::{generate_component, generate_project, plan_component, ComponentKind, ComponentRequest, PaginationStrategy};

/// Command-line interface for FastInit
///
/// Scaffolds FastAPI projects and adds models, schemas, services and routes
/// to them.
#[derive(Parser, Debug)]
#[command(name = "fastinit")]
#[command(about = "FastAPI project scaffolder", long_about = None)]
pub struct Cli {
    /// Log generator decisions at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available FastInit commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new FastAPI project
    Init {
        /// Project directory name (may come from --config instead)
        name: Option<String>,

        /// Directory the project directory is created in
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Add SQLAlchemy persistence and Alembic migrations
        #[arg(long, default_value_t = false)]
        db: bool,

        /// Database engine used with --db
        #[arg(long, value_enum)]
        db_type: Option<EngineArg>,

        /// Add JWT authentication helpers
        #[arg(long, default_value_t = false)]
        jwt: bool,

        /// Add structured logging setup
        #[arg(long, default_value_t = false)]
        logging: bool,

        /// Add Dockerfile and docker-compose.yml
        #[arg(long, default_value_t = false)]
        docker: bool,

        /// Python version targeted by the project (default: 3.11)
        #[arg(long)]
        python_version: Option<String>,

        /// TOML, YAML or JSON file with project settings.
        /// Flags given on the command line take precedence.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Add a component to an existing project
    New {
        /// What to generate
        #[arg(value_enum)]
        kind: NewKind,

        /// Entity name (`Product`), service name (`ProductService`) or
        /// lowercase route name (`products`) depending on the kind.
        /// PascalCase names are used verbatim as the class name
        name: String,

        /// Root of the project to add the component to
        #[arg(short, long, default_value = ".")]
        project_dir: PathBuf,

        /// Comma-separated `name:type` fields, e.g. "name:str,price:float,notes:text?"
        #[arg(short, long, default_value = "")]
        fields: String,

        /// Listing strategy for services and routes: limit-offset, cursor or none
        #[arg(long, default_value = "limit-offset")]
        pagination: String,

        /// Model a service operates on (service only)
        #[arg(long)]
        model: Option<String>,

        /// Service a route delegates to (route only)
        #[arg(long)]
        service: Option<String>,

        /// Show what would be generated without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print the FastInit version
    Version,
}

/// Component kinds accepted by `new`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum NewKind {
    /// SQLAlchemy model
    Model,
    /// Pydantic schemas
    Schema,
    /// Service functions
    Service,
    /// API router
    Route,
    /// Model, schema, service and route together
    Crud,
}

impl From<NewKind> for ComponentKind {
    fn from(kind: NewKind) -> Self {
        match kind {
            NewKind::Model => ComponentKind::Model,
            NewKind::Schema => ComponentKind::Schema,
            NewKind::Service => ComponentKind::Service,
            NewKind::Route => ComponentKind::Route,
            NewKind::Crud => ComponentKind::Crud,
        }
    }
}

/// Database engines accepted by `--db-type`
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Postgresql,
    Mysql,
    Sqlite,
}

impl From<EngineArg> for PersistenceEngine {
    fn from(engine: EngineArg) -> Self {
        match engine {
            EngineArg::Postgresql => PersistenceEngine::Postgresql,
            EngineArg::Mysql => PersistenceEngine::Mysql,
            EngineArg::Sqlite => PersistenceEngine::Sqlite,
        }
    }
}

/// Execute a parsed command line.
///
/// # Errors
///
/// Any generation failure, with context naming the request.
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Init {
            name,
            output,
            db,
            db_type,
            jwt,
            logging,
            docker,
            python_version,
            config,
        } => {
            let mut settings = match &config {
                Some(path) => ProjectConfiguration::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ProjectConfiguration::default(),
            };
            if let Some(name) = name {
                settings.project_name = name;
            }
            if let Some(output) = output {
                settings.output_directory = output;
            }
            settings.enable_persistence |= db;
            settings.enable_auth |= jwt;
            settings.enable_logging |= logging;
            settings.enable_containerization |= docker;
            if let Some(engine) = db_type {
                settings.persistence_engine = engine.into();
            }
            if let Some(version) = python_version {
                settings.runtime_version = version;
            }

            let created = generate_project(&settings)
                .with_context(|| format!("Failed to create project '{}'", settings.project_name))?;
            let root = settings.project_path();
            for path in &created {
                println!("✅ Created {}", display_relative(path, &root));
            }
            println!("✅ Project '{}' created at {}", settings.project_name, root.display());
            println!();
            println!("Next steps:");
            println!("  cd {}", root.display());
            println!("  pip install -r requirements.txt");
            println!("  cd app && uvicorn main:app --reload");
            Ok(())
        }
        Commands::New {
            kind,
            name,
            project_dir,
            fields,
            pagination,
            model,
            service,
            dry_run,
        } => {
            let kind = ComponentKind::from(kind);
            let mut request = ComponentRequest::new(kind, &name, &project_dir)
                .with_fields(fields)
                .with_pagination(pagination);
            request.reference = match kind {
                ComponentKind::Service => model,
                ComponentKind::Route => service,
                _ => None,
            };

            if dry_run {
                let plan = plan_component(&request)
                    .with_context(|| format!("Failed to plan {kind} '{name}'"))?;
                for artifact in plan {
                    println!("📝 Would create {}", display_relative(&artifact.path, &project_dir));
                    println!("{}", artifact.contents);
                }
                return Ok(());
            }

            let created = generate_component(&request)
                .with_context(|| format!("Failed to generate {kind} '{name}'"))?;
            for path in &created {
                println!("✅ Created {}", display_relative(path, &project_dir));
            }
            Ok(())
        }
        Commands::Version => {
            println!("FastInit {}", env!("CARGO_PKG_VERSION"));
            println!(
                "Pagination strategies: {}",
                PaginationStrategy::ALL.map(PaginationStrategy::as_str).join(", ")
            );
            Ok(())
        }
    }
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}
