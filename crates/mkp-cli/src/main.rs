use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use mkp_status::Resolution;

#[derive(Parser)]
#[command(name = "mkp")]
#[command(about = "Machinery marketplace admin CLI", long_about = None)]
struct Cli {
    /// Layered config paths in merge order (base -> env -> local).
    /// Without any, backend commands read MKP_API_BASE_URL.
    #[arg(long = "config", global = true)]
    config_paths: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Order status commands
    Order {
        #[command(subcommand)]
        cmd: OrderCmd,
    },

    /// Payment slip review (pending slips only)
    Slip {
        #[command(subcommand)]
        cmd: SlipCmd,
    },

    /// Won-bid contract review (signed contracts only)
    Contract {
        #[command(subcommand)]
        cmd: ContractCmd,
    },

    /// User license verification (pending licenses only)
    License {
        #[command(subcommand)]
        cmd: LicenseCmd,
    },

    /// Print the bidding phase of a window at a point in time
    Window {
        /// Bidding opens (RFC 3339)
        #[arg(long)]
        opens: String,

        /// Bidding closes (RFC 3339)
        #[arg(long)]
        closes: String,

        /// Evaluation time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Subcommand)]
enum OrderCmd {
    /// List every status with selected/enabled flags (offline)
    Options {
        /// Current status (name or numeric code)
        #[arg(long)]
        current: String,
    },

    /// Fetch the order and move it to a new status
    SetStatus {
        #[arg(long)]
        id: String,

        /// Target status (name or numeric code)
        #[arg(long)]
        to: String,
    },
}

#[derive(Subcommand)]
enum SlipCmd {
    Approve {
        #[arg(long)]
        id: String,
    },
    Decline {
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum ContractCmd {
    Approve {
        /// Won bid id
        #[arg(long)]
        id: String,
    },
    Reject {
        /// Won bid id
        #[arg(long)]
        id: String,
    },
}

#[derive(Subcommand)]
enum LicenseCmd {
    Approve {
        #[arg(long)]
        user_id: String,
    },
    Decline {
        #[arg(long)]
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Silent if the file does not exist; deployments inject env vars directly.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = mkp_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Order { cmd } => match cmd {
            OrderCmd::Options { current } => commands::order::print_options(&current)?,
            OrderCmd::SetStatus { id, to } => {
                let gw = commands::connect_admin(&cli.config_paths)?;
                commands::order::set_status(&gw, &id, &to).await?;
            }
        },

        Commands::Slip { cmd } => {
            let (id, resolution) = match cmd {
                SlipCmd::Approve { id } => (id, Resolution::Approve),
                SlipCmd::Decline { id } => (id, Resolution::Reject),
            };
            let gw = commands::connect_admin(&cli.config_paths)?;
            commands::review::resolve_slip(&gw, &id, resolution).await?;
        }

        Commands::Contract { cmd } => {
            let (id, resolution) = match cmd {
                ContractCmd::Approve { id } => (id, Resolution::Approve),
                ContractCmd::Reject { id } => (id, Resolution::Reject),
            };
            let gw = commands::connect_admin(&cli.config_paths)?;
            commands::review::resolve_contract(&gw, &id, resolution).await?;
        }

        Commands::License { cmd } => {
            let (user_id, resolution) = match cmd {
                LicenseCmd::Approve { user_id } => (user_id, Resolution::Approve),
                LicenseCmd::Decline { user_id } => (user_id, Resolution::Reject),
            };
            let gw = commands::connect_admin(&cli.config_paths)?;
            commands::review::resolve_license(&gw, &user_id, resolution).await?;
        }

        Commands::Window { opens, closes, at } => {
            commands::window::print_phase(&opens, &closes, at.as_deref())?
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays `key=value` only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();
}
