//! # CLI Module
//!
//! Command-line surface of the `fastinit` binary.
//!
//! ## Commands
//!
//! ### `init`
//!
//! Create a new project:
//!
//! ```bash
//! fastinit init my-api --db --db-type sqlite --jwt --docker
//! ```
//!
//! Options:
//! - `--output <DIR>` - Parent directory (default: current directory)
//! - `--db` / `--db-type <ENGINE>` - Persistence with postgresql, mysql or sqlite
//! - `--jwt` - Authentication helpers
//! - `--logging` - Logging setup
//! - `--docker` - Container files
//! - `--python-version <V>` - Target Python version (default: 3.11)
//! - `--config <FILE>` - Load settings from TOML, YAML or JSON
//!
//! ### `new`
//!
//! Add components to an existing project:
//!
//! ```bash
//! fastinit new crud Product --fields "name:str,price:float" --pagination cursor
//! fastinit new service UserService
//! fastinit new route users --pagination none
//! ```
//!
//! `--dry-run` prints the files that would be written.
//!
//! ### `version`
//!
//! ```bash
//! fastinit version
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use fastinit::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! run_cli(Cli::parse())?;
//! ```
//!
//! Failures are returned as `anyhow::Error`; the binary prints the chain and
//! exits with status 1.

mod commands;


pub use commands::{run_cli, Cli, Commands, EngineArg, NewKind};
