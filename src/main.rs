// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! contestctl: command-line client for the photo contest API.
//!
//! Keeps the session (tokens plus a cached user) in a local JSON file so
//! that consecutive invocations share one login.

use anyhow::Context;
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use photo_contest_client::{
    api::{EntryOrdering, EntryQuery},
    config::Config,
    db::{FileStore, KeyValueStore},
    middleware::LogNavigator,
    models::Contest,
    services::{calendar, ApiClient, AuthSession, AuthStatus},
    time_utils::format_display,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "contestctl", version, about = "Photo contest API client")]
struct Cli {
    /// API base URL (overrides API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file (overrides TOKEN_STORE_PATH)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Emit JSON log lines (overrides LOG_JSON)
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in with a Google ID token
    Login {
        #[arg(long)]
        id_token: String,
    },
    /// Store the tokens delivered by an OAuth redirect
    Callback {
        #[arg(long)]
        access: String,
        #[arg(long)]
        refresh: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List contests
    Contests {
        /// Only contests created by me
        #[arg(long, conflicts_with = "judging")]
        mine: bool,
        /// Only contests I judge
        #[arg(long)]
        judging: bool,
    },
    /// Show one contest
    Contest { slug: String },
    /// List entries
    Entries {
        /// Contest slug
        #[arg(long)]
        contest: Option<String>,
        #[arg(long, value_enum)]
        ordering: Option<Ordering>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Upcoming contest dates
    Calendar {
        /// Days ahead to show
        #[arg(long, default_value_t = 30)]
        days: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Ordering {
    Newest,
    Oldest,
    MostVoted,
    LeastVoted,
}

impl From<Ordering> for EntryOrdering {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Newest => EntryOrdering::Newest,
            Ordering::Oldest => EntryOrdering::Oldest,
            Ordering::MostVoted => EntryOrdering::MostVoted,
            Ordering::LeastVoted => EntryOrdering::LeastVoted,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url.clone() {
        config.api_url = api_url;
    }
    if let Some(store) = cli.store.clone() {
        config.token_store_path = store;
    }
    config.log_json |= cli.json_logs;

    init_logging(config.log_json)?;

    let kv: Arc<dyn KeyValueStore> = Arc::new(
        FileStore::open(config.token_store_path.clone()).with_context(|| {
            format!(
                "Failed to open session store {}",
                config.token_store_path.display()
            )
        })?,
    );
    tracing::debug!(api_url = %config.api_url, store = %config.token_store_path.display(), "Client configured");

    let client = Arc::new(ApiClient::from_config(
        &config,
        kv,
        Arc::new(LogNavigator),
    )?);
    let session = AuthSession::new(client.clone());
    session.restore()?;

    run(cli.command, &session, &client).await
}

async fn run(command: Command, session: &AuthSession, client: &ApiClient) -> anyhow::Result<()> {
    match command {
        Command::Login { id_token } => {
            let user = session.login(&id_token).await.context("Login failed")?;
            println!("Logged in as {} ({})", user.username, user.email);
        }
        Command::Callback { access, refresh } => {
            let state = session.accept_callback_tokens(&access, &refresh).await?;
            match state.user {
                Some(user) if state.status == AuthStatus::Authenticated => {
                    println!("Logged in as {}", user.username)
                }
                _ => anyhow::bail!("Tokens were not accepted by the server"),
            }
        }
        Command::Logout => {
            session.logout()?;
            println!("Logged out");
        }
        Command::Whoami => {
            let state = session.load_user().await;
            match state.user {
                Some(user) => {
                    println!("{} <{}> (id {})", user.username, user.email, user.id);
                    let mut roles = Vec::new();
                    if user.is_judge {
                        roles.push("judge");
                    }
                    if user.can_moderate() {
                        roles.push("moderator");
                    }
                    if user.is_admin() {
                        roles.push("admin");
                    }
                    if !roles.is_empty() {
                        println!("roles: {}", roles.join(", "));
                    }
                }
                None => println!("Not logged in"),
            }
        }
        Command::Contests { mine, judging } => {
            let listing = if mine {
                client.contests().mine().await?
            } else if judging {
                client.contests().judging().await?
            } else {
                client.contests().list().await?
            };
            let now = Utc::now();
            for contest in listing.items() {
                print_contest_line(contest, now);
            }
            println!("{} contest(s)", listing.total());
        }
        Command::Contest { slug } => {
            let contest = client.contests().get(&slug).await?;
            let now = Utc::now();
            println!("{} [{}]", contest.title, contest.slug);
            println!("phase:     {}", contest.reported_phase(now).label());
            println!("starts:    {}", format_display(contest.start_at));
            println!("ends:      {}", format_display(contest.end_at));
            if let Some(voting_end) = contest.voting_end_at {
                println!("voting:    {}", format_display(voting_end));
            }
            println!("entries:   {}", contest.entry_count);
            if !contest.description.is_empty() {
                println!("\n{}", contest.description);
            }
        }
        Command::Entries {
            contest,
            ordering,
            page,
        } => {
            let query = EntryQuery {
                contest,
                author: None,
                ordering: ordering.map(EntryOrdering::from),
                page,
            };
            let listing = client.entries().list(query).await?;
            for entry in listing.items() {
                let author = entry
                    .author
                    .as_ref()
                    .map(|user| user.username.as_str())
                    .unwrap_or("-");
                println!(
                    "{}  {:<40} by {:<16} {} vote(s)",
                    entry.id, entry.title, author, entry.vote_count
                );
            }
            if listing.has_next() {
                println!("(more entries available, use --page)");
            }
        }
        Command::Calendar { days } => {
            let contests = client.contests().list().await?.into_items();
            let events = calendar::derive_events(&contests);
            let now = Utc::now();
            for event in calendar::events_between(&events, now, now + Duration::days(days)) {
                println!("{}  {}  {}", format_display(event.start), event.title, event.link);
            }
        }
    }
    Ok(())
}

fn print_contest_line(contest: &Contest, now: chrono::DateTime<Utc>) {
    println!(
        "{:<24} {:<40} {:<18} {} - {}",
        contest.slug,
        contest.title,
        contest.reported_phase(now).label(),
        format_display(contest.start_at),
        format_display(contest.end_at),
    );
}

/// Initialize logging on stderr, JSON or human-readable.
fn init_logging(json: bool) -> anyhow::Result<()> {
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_current_span(true)
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("photo_contest_client=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(json_layer)
        .with(text_layer)
        .init();
    Ok(())
}
