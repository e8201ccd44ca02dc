use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::{Parser, Subcommand};

use repair_board::api::{ApiClient, FeedbackForm, ImageAttachment, MutationOutcome, RepairForm};
use repair_board::config;
use repair_board::feed;
use repair_board::session::SessionStore;
use repair_board::status;
use repair_board::sync::SyncOrchestrator;
use repair_board::types::RepairStatus;

#[derive(Parser)]
#[command(name = "repair-board", version, about = "Facility-repair ticketing client")]
struct Cli {
    /// Path to config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging to debug.log.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and persist the session.
    Login {
        username: String,
        password: String,
    },
    /// Drop the persisted session.
    Logout,
    /// List repair tickets.
    Repairs,
    /// Show one repair ticket.
    Repair { id: String },
    /// File a new repair request.
    Report {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        building: String,
        #[arg(long)]
        floor: String,
        #[arg(long)]
        room: String,
        #[arg(long)]
        description: String,
        /// Image attachments (repeatable).
        #[arg(long)]
        image: Vec<PathBuf>,
    },
    /// Rate a completed repair.
    Feedback {
        id: String,
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Move a ticket to a new status.
    SetStatus {
        id: String,
        status: String,
    },
    /// Status composition across all tickets.
    Summary,
    /// Show the notification feed, grouped by recency.
    Notifications,
    /// List the building/floor/room hierarchy.
    Areas,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up tracing.
    if cli.debug {
        let file = std::fs::File::create("debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(file)
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
    }

    let config = config::load_config(cli.config.as_deref())?;
    let client = ApiClient::new(&config.api).context("building API client")?;
    let session_store = SessionStore::new(config.session.resolved_path());
    let mut sync = SyncOrchestrator::new(client, session_store);

    // Commands other than login reuse the persisted session when present.
    // Logout is purely local and must work with the backend unreachable,
    // so it skips the token-validating restore.
    if !matches!(cli.command, Commands::Login { .. } | Commands::Logout) {
        sync.restore_session().await?;
    }

    match cli.command {
        Commands::Login { username, password } => {
            sync.login(&username, &password).await?;
            let user = sync.session().map(|s| s.user.name.clone()).unwrap_or_default();
            println!("logged in as {user}");
        }
        Commands::Logout => {
            sync.logout()?;
            println!("logged out");
        }
        Commands::Repairs => {
            sync.fetch_repairs().await;
            fail_on_store_error(sync.store().repairs.error())?;
            for repair in sync.store().repairs.items() {
                let display = repair.status.display();
                println!(
                    "#{:<6} {:10} [{}] {}",
                    repair.id, repair.report_date, display.text, repair.description
                );
            }
        }
        Commands::Repair { id } => {
            sync.fetch_repair_by_id(&id).await;
            fail_on_store_error(sync.store().repairs.error())?;
            let Some(repair) = sync.store().repairs.get(&id) else {
                bail!("repair {id} not found");
            };
            let display = repair.status.display();
            println!("#{} [{}] {}", repair.id, display.text, repair.description);
            println!("reported {} {} by {}", repair.report_date, repair.report_time, repair.reporter_name);
            if let Some(ref technician) = repair.received_by {
                println!("assigned to {technician}");
            }
            if let Some(ref solution) = repair.completed_solution {
                println!("solution: {solution}");
            }
            for image in &repair.images {
                println!("image: {image}");
            }
        }
        Commands::Report {
            date,
            time,
            name,
            phone,
            building,
            floor,
            room,
            description,
            image,
        } => {
            let mut images = Vec::new();
            for path in image {
                let bytes = std::fs::read(&path)
                    .with_context(|| format!("reading {}", path.display()))?;
                let filename = path
                    .file_name()
                    .map(|f| f.to_string_lossy().into_owned())
                    .unwrap_or_default();
                images.push(ImageAttachment { filename, bytes });
            }
            let form = RepairForm {
                report_date: date,
                report_time: time,
                reporter_name: name,
                reporter_phone: phone,
                building_id: building,
                floor_id: floor,
                room_id: room,
                description,
                images,
            };
            sync.submit_repair(&form).await?;
            println!("repair filed ({} on record)", sync.store().repairs.items().len());
        }
        Commands::Feedback { id, rating, comment } => {
            if !(1..=5).contains(&rating) {
                bail!("rating must be 1-5");
            }
            let form = FeedbackForm {
                repair_id: id,
                rating,
                comment,
            };
            sync.submit_feedback(&form).await?;
            println!("feedback recorded");
        }
        Commands::SetStatus { id, status } => {
            let result = sync
                .update_repair_status(&id, RepairStatus::from(status))
                .await?;
            let message = result.message.unwrap_or_default();
            match result.outcome {
                MutationOutcome::Success => println!("status updated. {message}"),
                MutationOutcome::Warning => println!("status updated with warning: {message}"),
                MutationOutcome::Error => bail!("status update rejected: {message}"),
            }
        }
        Commands::Summary => {
            sync.fetch_repairs().await;
            fail_on_store_error(sync.store().repairs.error())?;
            let summary = status::summarize(sync.store().repairs.items());
            for bucket in [summary.pending, summary.in_progress, summary.completed] {
                println!(
                    "{:<12} {:>4}  ({:.0}%)",
                    bucket.label,
                    bucket.count,
                    summary.percent(bucket.count)
                );
            }
            println!("{:<12} {:>4}", "TOTAL", summary.total);
        }
        Commands::Notifications => {
            sync.fetch_notifications().await;
            fail_on_store_error(sync.store().notifications.error())?;
            let feed = sync.feed();
            println!("{} unread", feed.unread_count);
            for (bucket, notifications) in feed::group(&feed.visible, Utc::now()) {
                println!("── {} ──", bucket.label());
                for n in notifications {
                    let marker = if n.is_read { " " } else { "*" };
                    println!("{marker} [{}] {}", n.kind.as_str(), n.title);
                }
            }
        }
        Commands::Areas => {
            sync.fetch_areas().await;
            fail_on_store_error(sync.store().areas.error())?;
            let Some(catalog) = sync.store().areas.value() else {
                bail!("no area catalog available");
            };
            for building in &catalog.buildings {
                println!("{}", building.name);
                for floor in catalog.floors_in(&building.id) {
                    println!("  {}", floor.name);
                    for room in catalog.rooms_in(&floor.id) {
                        println!("    {}", room.name);
                    }
                }
            }
        }
    }

    Ok(())
}

fn fail_on_store_error(error: Option<&str>) -> Result<()> {
    match error {
        Some(message) => bail!("{message}"),
        None => Ok(()),
    }
}
