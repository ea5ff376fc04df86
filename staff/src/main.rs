//! `ConsoleCraft` Staff - Command Line Entry Point
//!
//! Inspect the rank table and the dashboard snapshots.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cc_staff::auth::verify_access_code;
use cc_staff::config::{Config, LogFormat};
use cc_staff::content::{AnnouncementBoard, MessageStore, ReportBook, ReportFilter, ReportStatus, RuleBook};
use cc_staff::directory::StaffDirectory;
use cc_staff::navigation::visible_sections;
use cc_staff::permissions::{can_access_admin_panel, RankTable};
use cc_staff::punishments::{
    format_duration, PunishmentFilter, PunishmentKind, PunishmentLog, StatusFilter,
};

/// cc-staff - ConsoleCraft staff permission tool
#[derive(Parser, Debug)]
#[command(name = "cc-staff")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the rank table
    Ranks,

    /// Check whether a rank holds a permission
    Check {
        /// Rank token (e.g. moderator, kurucu)
        rank: String,

        /// Permission identifier (e.g. ban_players)
        permission: String,
    },

    /// Check whether one rank may manage another
    CanManage {
        manager: String,
        target: String,
    },

    /// List users from the data directory
    Users,

    /// List recorded punishments from the data directory
    Punishments {
        /// Case-insensitive search over target and reason
        #[arg(short, long, default_value = "")]
        search: String,

        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Only active punishments
        #[arg(long)]
        active: bool,
    },

    /// Print the server rules
    Rules,

    /// List announcements, newest first
    Announcements {
        /// Only important announcements
        #[arg(long)]
        important: bool,
    },

    /// List staff reports with per-status totals
    Reports {
        /// Case-insensitive search over title and description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Status filter (pending, investigating, resolved, rejected)
        #[arg(long)]
        status: Option<ReportStatus>,
    },

    /// Show unread direct messages for a user
    Inbox { user_id: String },

    /// Verify a dashboard access code
    VerifyCode { code: String },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KindArg {
    Mute,
    Ban,
    Kick,
    WebsiteBan,
}

impl From<KindArg> for PunishmentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Mute => Self::Mute,
            KindArg::Ban => Self::Ban,
            KindArg::Kick => Self::Kick,
            KindArg::WebsiteBan => Self::WebsiteBan,
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    init_tracing(&config);

    let table = RankTable::standard();
    if let Err(e) = table.ensure_valid() {
        if config.strict_rank_table {
            return Err(e).context("Refusing to start");
        }
        warn!(error = %e, "Rank table failed validation, continuing");
    }

    info!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "Starting cc-staff");

    match cli.command {
        Commands::Ranks => {
            for entry in table.by_level() {
                let permissions: Vec<&str> =
                    entry.permissions.permissions().map(|p| p.id()).collect();
                println!(
                    "{} {:<12} level {}  {}",
                    entry.badge,
                    entry.rank.as_str(),
                    entry.level,
                    permissions.join(", ")
                );
            }
        }
        Commands::Check { rank, permission } => {
            let rank = table.config_for_token(&rank)?.rank;
            let granted = table.has_permission_id(Some(rank), &permission);
            println!("{rank} {permission}: {}", if granted { "yes" } else { "no" });
        }
        Commands::CanManage { manager, target } => {
            let manager = table.config_for_token(&manager)?.rank;
            let target = table.config_for_token(&target)?.rank;
            let allowed = table.can_manage_user(manager, target);
            println!("{manager} -> {target}: {}", if allowed { "yes" } else { "no" });
        }
        Commands::Users => {
            let path = config.users_path();
            let directory = StaffDirectory::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            for user in directory.users() {
                let sections: Vec<String> = visible_sections(Some(user))
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!(
                    "{:<20} {:<12} admin-panel={} banned={} sections=[{}]",
                    user.display_label(),
                    user.rank.as_str(),
                    can_access_admin_panel(Some(user)),
                    user.is_banned,
                    sections.join(",")
                );
            }
        }
        Commands::Punishments {
            search,
            kind,
            active,
        } => {
            let path = config.punishments_path();
            let log = PunishmentLog::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let filter = PunishmentFilter {
                search,
                kind: kind.map(Into::into),
                status: if active {
                    StatusFilter::Active
                } else {
                    StatusFilter::All
                },
                ..PunishmentFilter::default()
            };
            for record in log.filter(&filter, Utc::now()) {
                println!(
                    "{} {:<12} {:<16} by {:<16} {:<10} {}",
                    record.timestamp.format("%Y-%m-%d %H:%M"),
                    record.kind.label(),
                    record.target_username,
                    record.staff_username,
                    record
                        .duration
                        .map_or_else(|| "-".to_string(), format_duration),
                    record.reason
                );
            }
        }
        Commands::Rules => {
            let path = config.rules_path();
            let book = RuleBook::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            for rule in book.rules() {
                println!("{} {} ({})", rule.icon, rule.title, rule.category);
                for (i, line) in rule.rules.iter().enumerate() {
                    println!("  {}. {line}", i + 1);
                }
            }
        }
        Commands::Announcements { important } => {
            let path = config.announcements_path();
            let board = AnnouncementBoard::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            for announcement in board
                .announcements()
                .iter()
                .filter(|a| !important || a.is_important)
            {
                println!(
                    "{} {}{} by {}",
                    announcement.timestamp.format("%Y-%m-%d %H:%M"),
                    if announcement.is_important { "[!] " } else { "" },
                    announcement.title,
                    announcement.author_name
                );
            }
        }
        Commands::Reports { search, status } => {
            let path = config.reports_path();
            let book = ReportBook::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            let filter = ReportFilter {
                search,
                status,
                ..ReportFilter::default()
            };
            for report in book.filter(&filter) {
                println!(
                    "{} {:<13} {:?} {:<24} by {}",
                    report.timestamp.format("%Y-%m-%d %H:%M"),
                    report.status.as_str(),
                    report.priority,
                    report.title,
                    report.reported_by
                );
            }
            let totals: Vec<String> = book
                .count_by_status()
                .iter()
                .map(|(status, count)| format!("{status}={count}"))
                .collect();
            println!("{}", totals.join(" "));
        }
        Commands::Inbox { user_id } => {
            let path = config.messages_path();
            let store = MessageStore::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            println!("{user_id}: {} unread", store.total_unread(&user_id));
        }
        Commands::VerifyCode { code } => {
            if !verify_access_code(&code) {
                bail!("Access code rejected");
            }
            println!("Access code accepted");
        }
    }

    Ok(())
}
