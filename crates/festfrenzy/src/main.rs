//! `festfrenzy`: browse events and run the organizer and admin
//! dashboards from a terminal.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use festfrenzy::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "festfrenzy", about = "FestFrenzy college event platform client", version)]
struct Cli {
    /// Backend base URL.
    #[arg(long, env = "FESTFRENZY_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Directory the sign-in token is kept in.
    #[arg(long, env = "FESTFRENZY_STATE_DIR", default_value = ".festfrenzy")]
    state_dir: PathBuf,

    /// Display offset from UTC in minutes.
    #[arg(
        long,
        env = "FESTFRENZY_UTC_OFFSET",
        default_value_t = 330,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-1439..=1439)
    )]
    utc_offset: i32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Refetch lists from the backend after every change.
    #[arg(long)]
    refetch: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in as an organizer or admin.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored sign-in.
    Logout,
    /// List upcoming events.
    Events {
        /// Only show events run by this committee.
        #[arg(long)]
        committee: Option<String>,
        /// Show the details of one event.
        #[arg(long, value_name = "ID")]
        show: Option<u64>,
    },
    /// Open your dashboard.
    Dashboard,
    /// Create an event (organizers).
    CreateEvent(NewEventArgs),
    /// Open the admin dashboard.
    Admin {
        /// Show the venue tab instead of pending organizers.
        #[arg(long)]
        venues: bool,
    },
    /// Approve a pending organizer (admins).
    Approve { id: u64 },
    /// Add a venue (admins).
    AddVenue {
        #[arg(long)]
        name: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        capacity: String,
    },
    /// Delete a venue (admins).
    DeleteVenue {
        id: u64,
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct NewEventArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    /// Venue id.
    #[arg(long)]
    venue: String,
    /// Local start time, `YYYY-MM-DDTHH:MM`.
    #[arg(long)]
    start: String,
    /// Local end time, `YYYY-MM-DDTHH:MM`.
    #[arg(long)]
    end: String,
    #[arg(long)]
    capacity: String,
    #[arg(long, default_value = "0")]
    cost: String,
}

impl Cli {
    fn client_config(&self) -> ClientConfig {
        let reconcile = if self.refetch {
            Reconcile::Refetch
        } else {
            Reconcile::Optimistic
        };
        ClientConfig {
            api_url: self.api_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            state_dir: self.state_dir.clone(),
            pages: PageConfig {
                utc_offset_minutes: self.utc_offset,
                reconcile,
                ..PageConfig::default()
            },
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    if let Command::DeleteVenue { id, yes: false } = &cli.command {
        eprintln!("Are you sure you want to delete venue {id}? Re-run with --yes to confirm.");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(screen) => {
            print!("{screen}");
            if screen.alert().is_some() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Screen, FestfrenzyError> {
    let app = App::connect(&cli.client_config())?;
    let ctx = app.context();

    match cli.command {
        Command::Login { email, password } => app.sign_in(email, password).await,
        Command::Logout => app.sign_out().await,
        Command::Events { committee, show } => {
            let mut screen = app.open(Route::Events).await?;
            if let Screen::Events(page) = &mut screen {
                if let Some(committee) = committee {
                    page.toggle_committee(&committee);
                }
                if let Some(id) = show {
                    if page.select_event(EventId(id)).is_none() {
                        tracing::warn!(id, "no such event");
                    }
                }
            }
            Ok(screen)
        }
        Command::Dashboard => app.open(Route::OrganizerDashboard).await,
        Command::CreateEvent(args) => {
            let mut screen = app.open(Route::OrganizerDashboard).await?;
            if let Screen::Organizer(page) = &mut screen {
                page.select_tab(OrganizerTab::CreateEvent);
                let draft = page.draft_mut();
                draft.title = args.title;
                draft.description = args.description;
                draft.venue_id = args.venue;
                draft.start = args.start;
                draft.end = args.end;
                draft.capacity = args.capacity;
                draft.cost = args.cost;
                if page.create_event(ctx).await.is_ok() {
                    page.select_tab(OrganizerTab::MyEvents);
                }
            }
            Ok(screen)
        }
        Command::Admin { venues } => {
            let mut screen = app.open(Route::AdminDashboard).await?;
            if let (Screen::Admin(page), true) = (&mut screen, venues) {
                page.select_tab(AdminTab::ManageVenues);
            }
            Ok(screen)
        }
        Command::Approve { id } => {
            let mut screen = app.open(Route::AdminDashboard).await?;
            if let Screen::Admin(page) = &mut screen {
                if let Err(e) = page.approve_organizer(ctx, UserId(id)).await {
                    tracing::debug!(error = %e, "approve failed");
                }
            }
            Ok(screen)
        }
        Command::AddVenue {
            name,
            location,
            capacity,
        } => {
            let mut screen = app.open(Route::AdminDashboard).await?;
            if let Screen::Admin(page) = &mut screen {
                page.select_tab(AdminTab::ManageVenues);
                let draft = page.venue_draft_mut();
                draft.name = name;
                draft.location = location;
                draft.capacity = capacity;
                if let Err(e) = page.add_venue(ctx).await {
                    tracing::debug!(error = %e, "add venue failed");
                }
            }
            Ok(screen)
        }
        Command::DeleteVenue { id, .. } => {
            let mut screen = app.open(Route::AdminDashboard).await?;
            if let Screen::Admin(page) = &mut screen {
                page.select_tab(AdminTab::ManageVenues);
                if let Err(e) = page.delete_venue(ctx, VenueId(id)).await {
                    tracing::debug!(error = %e, "delete venue failed");
                }
            }
            Ok(screen)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_accepts_negative_offset() {
        let cli = Cli::try_parse_from(["festfrenzy", "--utc-offset", "-300", "events"])
            .expect("should parse");

        assert_eq!(cli.client_config().pages.utc_offset_minutes, -300);
    }

    #[test]
    fn test_cli_rejects_offset_beyond_a_day() {
        let result = Cli::try_parse_from(["festfrenzy", "--utc-offset", "40000000", "events"]);

        assert!(result.is_err());
    }
}
