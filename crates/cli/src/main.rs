use anyhow::Result;
use clap::{Parser, Subcommand};
use template_deps::commands::{
    assigns_command, graph_command, impact_command, init_config_command, OutputFormat,
};
use template_deps::init_logging;

/// Dependency and change-impact analysis for Liquid templates.
///
/// This CLI is a thin wrapper around `template-deps-core` (exposed in code as
/// `template_deps_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "template-deps",
    version,
    about = "Dependency and change-impact analysis for Liquid templates",
    long_about = None
)]
struct Cli {
    /// Enable debug logging on stderr (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print which variables are computed from which.
    Graph {
        /// Path to the template file.
        #[arg(long)]
        template: String,

        /// Optional analyzer config (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the variables that must be recomputed when inputs change.
    ///
    /// The graph is built from `--template`, or loaded from a JSON file
    /// previously written by `graph --format json`.
    Impact {
        /// Path to the template file.
        #[arg(long, conflicts_with = "graph", required_unless_present = "graph")]
        template: Option<String>,

        /// Path to a saved dependency graph (JSON).
        #[arg(long)]
        graph: Option<String>,

        /// Changed variable. Repeat for several changes.
        #[arg(long = "variable", required = true)]
        variables: Vec<String>,

        /// Optional analyzer config (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List every assignment with the variables it reads.
    Assigns {
        /// Path to the template file.
        #[arg(long)]
        template: String,

        /// Optional analyzer config (.yaml, .yml or .json).
        #[arg(long)]
        config: Option<String>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write a default analyzer config (template-deps.yaml).
    InitConfig {
        /// Directory to write into. Defaults to the current working directory.
        #[arg(long, default_value = ".")]
        root: String,

        /// Overwrite an existing config.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Graph { template, config, format } => {
            graph_command(&template, config.as_deref(), format)?
        }
        Command::Impact { template, graph, variables, config, format } => impact_command(
            template.as_deref(),
            graph.as_deref(),
            &variables,
            config.as_deref(),
            format,
        )?,
        Command::Assigns { template, config, format } => {
            assigns_command(&template, config.as_deref(), format)?
        }
        Command::InitConfig { root, force } => init_config_command(&root, force)?,
    }

    Ok(())
}
