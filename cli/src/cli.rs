use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use newsletter_admin_business::{BASE_URL_ENV, ExportFormat};

#[derive(Parser)]
#[command(name = "newsletter-admin")]
#[command(about = "Admin tools for the MedTech newsletter service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the newsletter service (overrides config file)
    #[arg(long, global = true, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load an admin collection and show it as a table
    View {
        /// Dataset name (subscribers, documents, changes, newsletters, users) or an endpoint path
        target: String,

        /// Title shown above the table
        #[arg(long, short = 't')]
        title: Option<String>,
    },
    /// Trigger a background job on the server
    Action {
        #[arg(value_enum)]
        job: Job,
    },
    /// Delete a user account
    DeleteUser {
        /// Numeric user ID
        id: u64,
    },
    /// Print the URL of a generated newsletter
    Preview {
        /// Newsletter ID
        id: u64,
    },
    /// Download a generated newsletter to a file
    Export {
        /// Newsletter ID
        id: u64,

        /// Output format: html or text
        #[arg(long, short = 'f', default_value = "html")]
        format: ExportFormat,

        /// Directory to write into
        #[arg(long, short = 'o', default_value = ".")]
        out: PathBuf,
    },
    /// Subscribe an address to the newsletter
    Subscribe {
        email: String,

        #[arg(long, short = 'n', default_value = "")]
        name: String,

        #[arg(long, short = 'c', default_value = "")]
        company: String,

        /// Topic of interest (repeatable)
        #[arg(long = "interest", short = 'i')]
        interests: Vec<String>,
    },
    /// Unsubscribe an address
    Unsubscribe { email: String },
    /// Show service and scheduler status
    Status,
    /// Show or change the stored CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Store the base URL used when neither flag nor environment sets one
    SetBaseUrl { url: String },
    /// Forget the stored base URL
    ClearBaseUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Job {
    /// Scrape all monitored sources now
    Scraping,
    /// Generate a newsletter from pending changes now
    Newsletter,
}
