//! Command-line interface for attrsh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Schema source selection
//! - One-shot subcommands (version, completion scripts, config, complete)

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::warn;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::repl::SharedState;
use crate::repl::completion::{Completion, CompletionEngine};
use crate::schema::{
    CachedSchemaSource, ResourceAddress, SchemaSource, SnapshotSchemaSource, StaticSchemaSource,
};

/// Attribute path shell - schema-aware completion for management model attributes
#[derive(Parser, Debug)]
#[command(
    name = "attrsh",
    version,
    about = "Attribute path shell with schema-aware completion",
    long_about = "An interactive shell that completes dotted and indexed attribute paths
(foo.bar[2].baz) against management model attribute descriptions loaded from a
JSON snapshot."
)]
pub struct CliArgs {
    /// Schema snapshot file
    ///
    /// JSON object mapping resource addresses to read-resource-description responses.
    #[arg(value_name = "SCHEMA")]
    pub schema_file: Option<PathBuf>,

    /// Resource address to start at
    ///
    /// Example: attrsh model.json -a /subsystem=web
    #[arg(short = 'a', long, value_name = "ADDRESS")]
    pub address: Option<String>,

    /// Only complete attributes that are not read-only
    #[arg(short = 'w', long)]
    pub writable_only: bool,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for attrsh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },

    /// Complete an attribute path once and print the result
    ///
    /// Prints the insertion offset followed by one candidate per line, or -1
    /// when no completion is possible.
    Complete {
        /// Attribute path expression
        #[arg(value_name = "EXPR", allow_hyphen_values = true)]
        expression: String,

        /// Cursor position in bytes (defaults to the end of EXPR)
        #[arg(long, value_name = "N")]
        cursor: Option<usize>,
    },

    /// List the resource addresses described in the schema snapshot
    Addresses,
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::from_args(args)
    }

    /// Create a CLI interface from already parsed arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        // Load config from file (or use defaults if not exists)
        let config_path = args.config_file.as_deref();
        let mut config = Config::load_from_file(config_path)?;

        // Validate loaded configuration
        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        // Apply CLI arguments to override config values
        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    ///
    /// # Returns
    /// * `&Config` - Reference to configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resource address to start at
    ///
    /// # Returns
    /// * `Result<ResourceAddress>` - Parsed address or error if malformed
    pub fn address(&self) -> Result<ResourceAddress> {
        Ok(self.config.schema.address.parse::<ResourceAddress>()?)
    }

    /// Schema snapshot file, from arguments or configuration
    pub fn schema_file(&self) -> Option<&Path> {
        self.config.schema.file.as_deref()
    }

    /// Build the schema source for this session
    ///
    /// Without a snapshot file the source is empty and nothing completes.
    ///
    /// # Returns
    /// * `Arc<dyn SchemaSource>` - Cached snapshot source, or an empty one
    pub fn schema_source(&self) -> Arc<dyn SchemaSource> {
        match self.schema_file() {
            Some(path) => Arc::new(CachedSchemaSource::new(
                SnapshotSchemaSource::new(path),
                self.config.cache_ttl(),
            )),
            None => {
                warn!("No schema file given; attribute completion is disabled");
                Arc::new(StaticSchemaSource::new())
            }
        }
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    ///
    /// # Arguments
    /// * `config` - Configuration to modify
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        Self::apply_schema_args(config, args);
        Self::apply_display_args(config, args);
        Self::apply_logging_args(config, args);
    }

    /// Apply schema and completion CLI arguments to configuration
    fn apply_schema_args(config: &mut Config, args: &CliArgs) {
        if let Some(file) = &args.schema_file {
            config.schema.file = Some(file.clone());
        }

        if let Some(address) = &args.address {
            config.schema.address = address.clone();
        }

        if args.writable_only {
            config.completion.writable_only = true;
        }
    }

    /// Apply display-related CLI arguments to configuration
    fn apply_display_args(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color = false;
        }
    }

    /// Apply logging-related CLI arguments to configuration
    fn apply_logging_args(config: &mut Config, args: &CliArgs) {
        use crate::config::LogLevel;

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            Some(Commands::Complete { expression, cursor }) => {
                let completion = self.complete_expression(expression, *cursor)?;
                print!("{}", Self::render_completion(completion.as_ref()));
                Ok(true)
            }
            Some(Commands::Addresses) => {
                self.list_addresses()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("attrsh version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Complete an expression against the configured schema and address
    ///
    /// # Arguments
    /// * `expression` - Attribute path text
    /// * `cursor` - Cursor byte offset, `None` for the end of the text
    ///
    /// # Returns
    /// * `Result<Option<Completion>>` - Completion, `None` when nothing can be completed
    pub fn complete_expression(
        &self,
        expression: &str,
        cursor: Option<usize>,
    ) -> Result<Option<Completion>> {
        let state = SharedState::with_config(self.address()?, &self.config);
        let engine = CompletionEngine::with_source(self.schema_source(), state);
        Ok(engine.complete(expression, cursor.unwrap_or(expression.len())))
    }

    /// Text printed by the `complete` subcommand
    fn render_completion(completion: Option<&Completion>) -> String {
        match completion {
            Some(completion) => {
                let mut out = format!("{}\n", completion.offset);
                for candidate in &completion.candidates {
                    out.push_str(candidate);
                    out.push('\n');
                }
                out
            }
            None => "-1\n".to_string(),
        }
    }

    /// Print the addresses described by the snapshot, one per line
    fn list_addresses(&self) -> Result<()> {
        let Some(path) = self.schema_file() else {
            return Err(ConfigError::Generic("No schema file given".to_string()).into());
        };

        for address in SnapshotSchemaSource::new(path).addresses()? {
            println!("{}", address);
        }
        Ok(())
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    ///
    /// # Returns
    /// * `Result<()>` - Success or error
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show || !validate {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return Ok(());
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();

        match self.config.to_toml() {
            Ok(toml_str) => println!("{}", toml_str),
            Err(e) => {
                eprintln!("Error formatting configuration: {}", e);
                println!("{:#?}", self.config);
            }
        }

        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version and schema info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("Using attrsh: {}", env!("CARGO_PKG_VERSION"));
            match self.schema_file() {
                Some(path) => println!("Schema: {}", path.display()),
                None => println!("Schema: none"),
            }
            println!("Type 'help' for commands, Tab to complete.");
        }
    }
}
