use anyhow::Result;
use clap::{Parser, Subcommand};

use opsdeck::cli;

#[derive(Debug, Parser)]
#[command(name = "opsdeck")]
#[command(about = "Admin deck for the orchestrator, video queue, and hero feed")]
struct App {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a dashboard panel (overview, orchestrator, videos, hero, switches, logs, settings)
    Show {
        /// Route identifier; invalid routes fall back to the overview
        route: Option<String>,
    },
    /// Run health checks for one target or all of them
    Health {
        /// Target key: orchestrator, videos, or hero
        #[arg(long)]
        target: Option<String>,
    },
    /// Reset all health results to unknown
    ClearHealth,
    /// Refresh and render the video queue rows
    Rows,
    /// Refresh and render the hero products feed
    Products,
    /// Inspect or change feature switches
    Switches {
        #[command(subcommand)]
        action: Option<SwitchCommands>,
        /// Limit the listing to one scope (global, orchestrator, videos, hero)
        #[arg(long)]
        scope: Option<String>,
    },
    /// Inspect or change dashboard settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommands>,
    },
    /// Show or manage the logbook
    Logs {
        #[command(subcommand)]
        action: Option<LogCommands>,
        /// Maximum entries to display
        #[arg(long, default_value = "40")]
        limit: usize,
    },
    /// Trigger a backup for one target, or all targets
    Backup {
        /// Target key: orchestrator, videos, or hero
        #[arg(long)]
        target: Option<String>,
    },
    /// Lock or unlock mutating dashboard actions
    Lock {
        /// on, off, or status
        #[arg(default_value = "status")]
        mode: String,
    },
    /// Manage the application config file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Serve the embedded web dashboard
    Web {
        /// Listen address (default from config: 127.0.0.1:9760)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum SwitchCommands {
    /// Flip one switch and save (e.g. global.maintenance_mode)
    Toggle { key: String },
    /// Persist the current switches blob
    Save,
    /// Reset all switches to defaults
    Reset,
}

#[derive(Debug, Subcommand)]
enum SettingsCommands {
    /// Render the connections panel
    Show,
    /// Set one settings key (e.g. orchestrator.base_url)
    Set { key: String, value: String },
    /// Reset all settings to defaults
    Reset,
}

#[derive(Debug, Subcommand)]
enum LogCommands {
    /// Clear the logbook
    Clear,
    /// Export the logbook as formatted JSON
    Export {
        /// Output path (default: opsdeck-logs-<timestamp>.json)
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the annotated default config file
    Init {
        #[arg(long)]
        force: bool,
    },
    /// Set one config key (e.g. http.timeout_ms)
    Set { key: String, value: String },
    /// Reset the config file to defaults
    Reset,
}

fn main() -> Result<()> {
    let app = App::parse();

    match app.command {
        Commands::Show { route } => cli::run_show(route.as_deref()),
        Commands::Health { target } => cli::run_health(target.as_deref()),
        Commands::ClearHealth => cli::run_clear_health(),
        Commands::Rows => cli::run_rows(),
        Commands::Products => cli::run_products(),
        Commands::Switches { action, scope } => match action {
            None => cli::run_switches_list(scope.as_deref()),
            Some(SwitchCommands::Toggle { key }) => cli::run_switches_toggle(&key),
            Some(SwitchCommands::Save) => cli::run_switches_save(),
            Some(SwitchCommands::Reset) => cli::run_switches_reset(),
        },
        Commands::Settings { action } => match action {
            None | Some(SettingsCommands::Show) => cli::run_settings_show(),
            Some(SettingsCommands::Set { key, value }) => cli::run_settings_set(&key, &value),
            Some(SettingsCommands::Reset) => cli::run_settings_reset(),
        },
        Commands::Logs { action, limit } => match action {
            None => cli::run_logs(limit),
            Some(LogCommands::Clear) => cli::run_logs_clear(),
            Some(LogCommands::Export { out }) => cli::run_logs_export(out),
        },
        Commands::Backup { target } => cli::run_backup(target.as_deref()),
        Commands::Lock { mode } => cli::run_lock(&mode),
        Commands::Config { action } => match action {
            ConfigCommands::Show => cli::run_config_show(),
            ConfigCommands::Init { force } => cli::run_config_init(force),
            ConfigCommands::Set { key, value } => cli::run_config_set(&key, &value),
            ConfigCommands::Reset => cli::run_config_reset(),
        },
        Commands::Web { addr } => cli::run_web(addr.as_deref()),
    }
}
