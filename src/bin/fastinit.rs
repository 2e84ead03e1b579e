use clap::Parser;
use fastinit::cli::{run_cli, Cli};
use fastinit::logging::{init_logging, LogConfig};

fn main() {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config.log_level = "debug".to_string();
    }
    if let Err(err) = init_logging(&log_config) {
        eprintln!("warning: {err:#}");
    }

    // Failures go to stdout next to the progress lines.
    if let Err(err) = run_cli(cli) {
        println!("❌ Error: {err:#}");
        std::process::exit(1);
    }
}
