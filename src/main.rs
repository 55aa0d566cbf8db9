//! attrsh - attribute path shell
//!
//! An interactive shell that completes management model attribute paths
//! (`foo.bar[2].baz`) against attribute descriptions loaded from a JSON
//! snapshot.
//!
//! # Features
//!
//! - Interactive REPL with path highlighting and tab completion
//! - Writable-only completion mode
//! - Switching between resource addresses
//! - One-shot completion for scripting (`attrsh complete`)
//! - Configuration management
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! attrsh model.json --address /subsystem=web
//! ```

use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use attrsh::cli::CliInterface;
use attrsh::error::Result;
use attrsh::executor::ExecutionContext;
use attrsh::formatter::Formatter;
use attrsh::repl::{ReplEngine, SharedState};

/// Application entry point
fn main() {
    // Initialize the application and handle any errors
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the shell
///
/// # Returns
/// * `Result<()>` - Success or error
fn run() -> Result<()> {
    // Parse command-line arguments and load configuration
    let cli = CliInterface::new()?;

    // Initialize logging based on verbosity
    initialize_logging(&cli);

    // Handle subcommands (version, completion, config, complete, addresses)
    if cli.handle_subcommand()? {
        return Ok(());
    }

    // Print banner if not in quiet mode
    cli.print_banner();

    // Run in interactive mode
    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let shared_state = SharedState::with_config(cli.address()?, cli.config());
    let exec_context = ExecutionContext::new(shared_state.clone(), cli.schema_source());
    let mut repl = ReplEngine::new(
        shared_state.clone(),
        &cli.config().history,
        cli.config().display.highlighting,
        exec_context.engine(),
    )?;

    run_repl_loop(&mut repl, &exec_context, &shared_state)?;

    println!("Goodbye!");
    Ok(())
}

/// Main REPL loop
fn run_repl_loop(
    repl: &mut ReplEngine,
    exec_context: &ExecutionContext,
    shared_state: &SharedState,
) -> Result<()> {
    while repl.is_running() {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        let formatter = Formatter::new(shared_state.color_enabled());

        let command = match repl.process_input(&input) {
            Ok(cmd) => cmd,
            Err(e) => {
                eprintln!("{}", formatter.colorizer().error(&e.to_string()));
                continue;
            }
        };

        if !repl.is_running() {
            break;
        }

        match exec_context.execute(command) {
            Ok(result) => {
                debug!("Command finished, success: {}", result.success);
                if let Some(output) = formatter.format(&result) {
                    println!("{}", output);
                }
            }
            Err(e) => eprintln!("{}", formatter.colorizer().error(&e.to_string())),
        }
    }

    Ok(())
}

/// Initialize logging system based on the configured level
///
/// `RUST_LOG` directives take precedence over the configured level.
///
/// # Arguments
/// * `cli` - CLI interface with logging settings
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    // Build subscriber with level filter; stdout is reserved for command output
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    // Configure timestamps
    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
