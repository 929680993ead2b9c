// ==========================================
// 仓库库存登记系统 - 命令行主入口
// ==========================================
// 子命令: import / add / list / export / stats / login / register /
//         logout / whoami / profile / password / notifications / config
// ==========================================

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use inventaris_gudang::api::ApiError;
use inventaris_gudang::app::{get_default_db_path, AppState};
use inventaris_gudang::config::config_keys;
use inventaris_gudang::domain::notification::unread_count;
use inventaris_gudang::domain::{GoodsKind, ImportSource, ListQuery, ProfileUpdate, RawRow};
use inventaris_gudang::i18n::{t, t_with_args};
use inventaris_gudang::logging;
use std::path::PathBuf;

/// Pencatatan barang masuk dan keluar gudang.
#[derive(Parser, Debug)]
#[command(name = "inventaris", version, about = "Inventaris Gudang CLI")]
struct Cli {
    /// Path to the local database (default: platform data dir).
    #[arg(long, global = true, env = "INVENTARIS_DB_PATH")]
    db: Option<String>,

    /// Verbose logging when RUST_LOG is not set.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KindArg {
    /// Barang masuk.
    #[value(alias = "masuk")]
    Incoming,
    /// Barang keluar.
    #[value(alias = "keluar")]
    Outgoing,
}

impl From<KindArg> for GoodsKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Incoming => GoodsKind::Incoming,
            KindArg::Outgoing => GoodsKind::Outgoing,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ExportTarget {
    Incoming,
    Outgoing,
    Combined,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Import a spreadsheet (.xlsx/.xls/.ods/.csv).
    Import {
        #[arg(value_enum)]
        kind: KindArg,
        file: PathBuf,
    },

    /// Add a single record from column=value pairs.
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        /// Column and value, e.g. -f "Serial Number=SN-001". Repeatable.
        #[arg(short = 'f', long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// List records.
    List {
        #[arg(value_enum)]
        kind: KindArg,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        search: Option<String>,
        /// Print raw JSON.
        #[arg(long)]
        json: bool,
    },

    /// Export a report to the export directory.
    Export {
        #[arg(value_enum)]
        target: ExportTarget,
    },

    /// Show dashboard statistics.
    Stats {
        /// Months of chart data.
        #[arg(long, default_value_t = 6)]
        months: u32,
    },

    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "INVENTARIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        full_name: String,
        #[arg(long, env = "INVENTARIS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Sign out and clear the stored session.
    Logout,

    /// Show the current session.
    Whoami {
        /// Refresh the profile from the backend.
        #[arg(long)]
        refresh: bool,
    },

    /// Update the signed-in user's profile.
    Profile {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        division: Option<String>,
        #[arg(long)]
        job_title: Option<String>,
    },

    /// Change the password of the signed-in user.
    Password {
        #[arg(long, env = "INVENTARIS_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long = "new", env = "INVENTARIS_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
        /// Repeat the new password.
        #[arg(long, env = "INVENTARIS_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },

    /// Notifications for the signed-in user.
    Notifications {
        #[command(subcommand)]
        action: Option<NotificationAction>,
    },

    /// Local configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum NotificationAction {
    /// List recent notifications (default).
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Mark one notification as read.
    Read { id: String },
    /// Mark all notifications as read.
    ReadAll,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print one value.
    Get { key: String },
    /// Set a value.
    Set { key: String, value: String },
    /// Remove a stored value (back to default).
    Reset { key: String },
    /// Print all effective values.
    List,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected COLUMN=VALUE, got '{}'", raw))?;
    if key.trim().is_empty() {
        return Err("column name is empty".to_string());
    }
    Ok((key.trim().to_string(), value.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    tracing::debug!(db_path = %db_path, version = inventaris_gudang::VERSION, "启动");

    let state = AppState::new(db_path).context("无法初始化AppState")?;

    match run(&state, cli.command).await {
        Err(e) => match e.downcast_ref::<ApiError>() {
            Some(ApiError::AuthExpired) => bail!(t("auth.expired")),
            Some(ApiError::NotSignedIn) => bail!(t("auth.not_signed_in")),
            _ => Err(e),
        },
        ok => ok,
    }
}

async fn run(state: &AppState, command: Commands) -> anyhow::Result<()> {
    let api = &state.inventory_api;

    match command {
        Commands::Import { kind, file } => {
            let outcome = api.import_goods_from_path(&file, kind.into()).await?;

            for failure in &outcome.failures {
                eprintln!(
                    "  #{:<5} {:<20} {:<24} {}",
                    failure.row_number, failure.serial_number, failure.kind, failure.reason
                );
            }

            if !outcome.success {
                bail!(outcome.error.unwrap_or_else(|| t("import.failed")));
            }

            let source = match outcome.source {
                ImportSource::Server => "server",
                ImportSource::Client => "client",
                ImportSource::None => "-",
            };
            println!(
                "{} ({})",
                t_with_args("import.summary", &[("count", &outcome.count.to_string())]),
                source
            );
        }

        Commands::Add { kind, fields } => {
            let row: RawRow = fields.into_iter().collect();
            let json = match GoodsKind::from(kind) {
                GoodsKind::Incoming => serde_json::to_string_pretty(&api.add_incoming_item(&row).await?)?,
                GoodsKind::Outgoing => serde_json::to_string_pretty(&api.add_outgoing_item(&row).await?)?,
            };
            println!("{}", json);
        }

        Commands::List {
            kind,
            page,
            limit,
            search,
            json,
        } => {
            let query = ListQuery {
                page,
                limit,
                search: search.filter(|s| !s.trim().is_empty()),
            };
            match GoodsKind::from(kind) {
                GoodsKind::Incoming => {
                    let result = api.list_incoming(&query).await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        for item in &result.data {
                            println!(
                                "{:<20} {:<30} {:>6} {:<8} {}",
                                item.serial_number, item.item_name, item.quantity, item.unit, item.asset_status
                            );
                        }
                        println!("-- {}/{} ({})", result.page, result.total_pages, result.total);
                    }
                }
                GoodsKind::Outgoing => {
                    let result = api.list_outgoing(&query).await?;
                    if json {
                        println!("{}", serde_json::to_string_pretty(&result)?);
                    } else {
                        for item in &result.data {
                            println!(
                                "{:<20} {:<30} {:>6} {:<10} {}",
                                item.serial_number, item.item_name, item.quantity, item.status, item.employee_name
                            );
                        }
                        println!("-- {}/{} ({})", result.page, result.total_pages, result.total);
                    }
                }
            }
        }

        Commands::Export { target } => {
            let artifact = match target {
                ExportTarget::Incoming => api.export_goods(GoodsKind::Incoming).await?,
                ExportTarget::Outgoing => api.export_goods(GoodsKind::Outgoing).await?,
                ExportTarget::Combined => api.export_combined().await?,
            };
            println!(
                "{}",
                t_with_args("export.saved", &[("path", &artifact.path.display().to_string())])
            );
        }

        Commands::Stats { months } => {
            let stats = api.dashboard_stats().await?;
            println!("{}", serde_json::to_string_pretty(&stats)?);

            for point in api.chart_data(months).await? {
                println!("{:<10} masuk={:<6} keluar={}", point.name, point.masuk, point.keluar);
            }
            for point in api.ownership_data().await? {
                println!("{:<10} {}", point.name, point.value);
            }
        }

        Commands::Login { email, password } => {
            let session = state.auth_api.sign_in(&email, &password).await?;
            println!("{} ({})", session.display_name(), session.role);
        }

        Commands::Register {
            email,
            full_name,
            password,
        } => {
            let session = state.auth_api.sign_up(&email, &password, &full_name).await?;
            println!("{} ({})", session.display_name(), session.role);
        }

        Commands::Logout => {
            state.auth_api.sign_out().await?;
            println!("{}", t("common.success"));
        }

        Commands::Whoami { refresh } => {
            let session = if refresh {
                Some(state.auth_api.refresh_profile().await?)
            } else {
                state.auth_api.current_session()?
            };
            match session {
                Some(session) => println!(
                    "{} <{}> ({})",
                    session.display_name(),
                    session.user.email,
                    session.role
                ),
                None => println!("{}", t("auth.not_signed_in")),
            }
        }

        Commands::Profile {
            full_name,
            phone,
            division,
            job_title,
        } => {
            let update = ProfileUpdate {
                full_name,
                phone,
                division,
                job_title,
            };
            let session = state.auth_api.update_profile(update).await?;
            if let Some(profile) = &session.profile {
                println!("{}", serde_json::to_string_pretty(profile)?);
            }
        }

        Commands::Password {
            current,
            new_password,
            confirm,
        } => {
            if new_password != confirm {
                bail!(t("auth.password_mismatch"));
            }
            state.auth_api.update_password(&current, &new_password).await?;
            println!("{}", t("common.success"));
        }

        Commands::Notifications { action } => {
            let notifications = &state.notifications_api;
            match action.unwrap_or(NotificationAction::List { limit: None }) {
                NotificationAction::List { limit } => {
                    let items = notifications.list(limit).await?;
                    for item in &items {
                        println!(
                            "{} {:<36} {:<10} {} - {}",
                            if item.is_read { " " } else { "*" },
                            item.id,
                            item.kind,
                            item.title,
                            item.message
                        );
                    }
                    println!(
                        "{}",
                        t_with_args(
                            "notification.unread",
                            &[("count", &unread_count(&items).to_string())]
                        )
                    );
                }
                NotificationAction::Read { id } => {
                    notifications.mark_read(&id).await?;
                    println!("{}", t("common.success"));
                }
                NotificationAction::ReadAll => {
                    notifications.mark_all_read().await?;
                    println!("{}", t("common.success"));
                }
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Get { key } => {
                let value = state.config.get_config_value(&key)?;
                println!("{}", value.unwrap_or_default());
            }
            ConfigAction::Set { key, value } => {
                state.config.set_config_value(&key, &value)?;
                println!("{} = {}", key, value);
            }
            ConfigAction::Reset { key } => {
                state.config.reset_config_value(&key)?;
                println!("{} ({})", key, t("common.success"));
            }
            ConfigAction::List => {
                println!("{}", state.config.get_config_snapshot()?);
                println!("keys: {}", config_keys::ALL.join(", "));
            }
        },
    }

    Ok(())
}
