//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fedcat - federated catalog
///
/// Query any number of device catalogs as one paginated, filterable view.
#[derive(Parser, Debug)]
#[command(
    name = "fedcat",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Federated catalog for networked devices, resources and services",
    long_about = "fedcat federates independently-operated device catalogs behind one \
                  read-only view with stable pagination and attribute-path filtering. \
                  Catalogs are listed in fedcat.yaml or passed with --catalog.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  fedcat list --per-page 10\n    \
                  fedcat get urn:fedcat:device:hall-3\n    \
                  fedcat filter meta.manufacturer equals acme\n    \
                  fedcat filter name contains temperature --resources\n    \
                  fedcat catalogs --catalog 'sites/*.json'\n\n\
                  \x1b[1m\x1b[32mDocumentation:\x1b[0m\n    \
                  https://github.com/asyrjasalo/fedcat"
)]
pub struct Cli {
    /// Configuration file (defaults to fedcat.yaml lookup)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Federate these catalog sources instead of the configured ones
    #[arg(long = "catalog", value_name = "SOURCE", global = true)]
    pub catalogs: Vec<String>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List devices across the federated catalogs
    List(ListArgs),

    /// Look up one device or resource by id
    Get(GetArgs),

    /// Filter devices or resources by attribute path
    Filter(FilterArgs),

    /// Show the federated catalogs and their item counts
    Catalogs,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the first page:\n    fedcat list\n\n\
                  Page through with a custom page size:\n    fedcat list --page 3 --per-page 50\n\n\
                  Include resources and timestamps:\n    fedcat list --detailed")]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Devices per page
    #[arg(long = "per-page", default_value_t = 20)]
    pub per_page: usize,

    /// Show detailed output
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Look up a device:\n    fedcat get urn:fedcat:device:hall-3\n\n\
                  Look up a resource:\n    fedcat get urn:fedcat:resource:hall-3-temp --resource")]
pub struct GetArgs {
    /// Device id (or resource id with --resource)
    pub id: String,

    /// Look up a resource instead of a device
    #[arg(long)]
    pub resource: bool,
}

/// Arguments for the filter command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Devices by metadata:\n    fedcat filter meta.manufacturer equals acme\n\n\
                  First matching device only:\n    fedcat filter name prefix hall- --one\n\n\
                  Devices owning matching resources:\n    fedcat filter name contains temperature --resources\n\n\
                  Operators: equals, prefix, suffix, contains")]
pub struct FilterArgs {
    /// Attribute path, dot-separated (e.g. meta.manufacturer)
    pub path: String,

    /// Comparison operator (equals, prefix, suffix, contains)
    pub op: String,

    /// Value to compare against
    pub value: String,

    /// Match resources instead of devices
    #[arg(long)]
    pub resources: bool,

    /// Return only the first match
    #[arg(long)]
    pub one: bool,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Items per page
    #[arg(long = "per-page", default_value_t = 20)]
    pub per_page: usize,

    /// Show detailed output
    #[arg(long)]
    pub detailed: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    fedcat completions --shell bash > ~/.bash_completion.d/fedcat\n\n\
                  Generate zsh completions:\n    fedcat completions --shell zsh > ~/.zfunc/_fedcat\n\n\
                  Generate fish completions:\n    fedcat completions --shell fish > ~/.config/fish/completions/fedcat.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long)]
    pub shell: String,
}
