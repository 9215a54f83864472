//! `bizdash` command line dashboard
//!
//! Drives the admin dashboard headlessly: every command navigates through the
//! route guard, waits for the page's fetch, performs the requested action and
//! prints the page as a text table.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

use bizdash_client::CredentialStore;
use bizdash_core::{Config, ModerationStatus};
use bizdash_dashboard::render::{self, render_business_details};
use bizdash_dashboard::{
    Dashboard, DashboardError, DashboardResult, FetchOutcome, NavigationOutcome, Route,
};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

/// Command line interface for the bizdash admin dashboard
#[derive(Parser)]
#[command(
    name = "bizdash",
    version = env!("CARGO_PKG_VERSION"),
    about = "Admin dashboard for the business marketplace API",
    long_about = "Lists products, users, businesses, subscription plans and reported reviews from the marketplace API and performs moderation actions on them."
)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable structured JSON logging
    #[arg(long)]
    json: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Manage the stored credential
    Token {
        /// Token subcommand
        #[command(subcommand)]
        action: TokenCommands,
    },

    /// Product moderation
    Products {
        /// Products subcommand
        #[command(subcommand)]
        action: ProductCommands,
    },

    /// Registered users
    Users {
        /// Users subcommand
        #[command(subcommand)]
        action: UserCommands,
    },

    /// Business moderation
    Businesses {
        /// Businesses subcommand
        #[command(subcommand)]
        action: BusinessCommands,
    },

    /// Subscription plans
    Subscriptions {
        /// Subscriptions subcommand
        #[command(subcommand)]
        action: SubscriptionCommands,
    },

    /// Reported reviews
    Reports {
        /// Reports subcommand
        #[command(subcommand)]
        action: ReportCommands,
    },
}

#[derive(Subcommand)]
enum TokenCommands {
    /// Store a bearer token
    Set {
        /// Token value
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Forget the stored token
    Clear,
    /// Show whether a token is stored
    Show,
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List products
    List {
        /// Expand the row with this title
        #[arg(long, value_name = "TITLE")]
        expand: Option<String>,
    },
    /// Change the status of a product
    SetStatus {
        /// Product ID
        id: i64,
        /// approved, pending or rejected
        status: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// List users
    List,
}

#[derive(Subcommand)]
enum BusinessCommands {
    /// List businesses
    List,
    /// Show the details of one business
    Show {
        /// Business ID
        id: i64,
    },
    /// Change the status of a business
    SetStatus {
        /// Business ID
        id: i64,
        /// approved, pending or rejected
        status: String,
    },
}

#[derive(Subcommand)]
enum SubscriptionCommands {
    /// List subscription plans
    List,
    /// Edit a plan; unspecified fields keep their current value
    Edit {
        /// Plan ID
        id: i64,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New weekly price
        #[arg(long)]
        weekly: Option<Decimal>,
        /// New monthly price
        #[arg(long)]
        monthly: Option<Decimal>,
        /// New yearly price
        #[arg(long)]
        yearly: Option<Decimal>,
        /// Whether the plan is active
        #[arg(long)]
        active: Option<bool>,
    },
}

#[derive(Subcommand)]
enum ReportCommands {
    /// List reported reviews
    List,
    /// Delete a reported review
    DeleteReview {
        /// Review ID
        review_id: i64,
    },
}

/// Main entry point for the dashboard CLI
#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        debug!("Note: .env file not loaded: {e}");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, remote = e.is_remote(), "command failed");
            eprintln!("Error: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("Hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> DashboardResult<ExitCode> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    config.validate()?;
    if let Err(e) = bizdash_core::init_logging(&config.logging) {
        eprintln!("Warning: {e}");
    }

    let credentials = match config.auth.token_file.as_deref() {
        Some(path) => CredentialStore::load_from_file(path).await?,
        None => CredentialStore::new(),
    };

    match cli.command {
        Commands::Token { action } => manage_token(&config, &credentials, action).await,
        command => {
            let mut dashboard = Dashboard::from_config(&config, credentials)?;
            run_page_command(&mut dashboard, command).await
        }
    }
}

async fn manage_token(
    config: &Config,
    credentials: &CredentialStore,
    action: TokenCommands,
) -> DashboardResult<ExitCode> {
    let persist = || {
        config.auth.token_file.clone().ok_or_else(|| {
            bizdash_core::Error::configuration(
                "auth.token_file must be set to store a token between runs",
            )
        })
    };

    match action {
        TokenCommands::Set { token } => {
            let path = persist()?;
            credentials.set(token);
            credentials.persist(&path).await?;
            println!("Token stored in {}", path.display());
        }
        TokenCommands::Clear => {
            let path = persist()?;
            credentials.clear();
            credentials.persist(&path).await?;
            println!("Token cleared");
        }
        TokenCommands::Show => {
            if credentials.has_token() {
                println!("A token is stored");
            } else {
                println!("No token stored");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn route_of(command: &Commands) -> Route {
    match command {
        Commands::Token { .. } => Route::SignIn,
        Commands::Products { .. } => Route::Products,
        Commands::Users { .. } => Route::Users,
        Commands::Businesses { .. } => Route::Businesses,
        Commands::Subscriptions { .. } => Route::Subscriptions,
        Commands::Reports { .. } => Route::Reports,
    }
}

async fn run_page_command(dashboard: &mut Dashboard, command: Commands) -> DashboardResult<ExitCode> {
    let route = route_of(&command);
    if let NavigationOutcome::Redirected { to, .. } = dashboard.navigate(route.path())? {
        if let Some(page) = dashboard.page() {
            print!("{}", render::render_page(page));
        }
        eprintln!("Redirected to {to}");
        return Ok(ExitCode::FAILURE);
    }

    if let Some(FetchOutcome::Failed { .. }) = dashboard.settle().await {
        if let Some(page) = dashboard.page() {
            print!("{}", render::render_page(page));
        }
        return Ok(ExitCode::FAILURE);
    }

    match command {
        Commands::Products { action } => {
            let view = dashboard.products()?;
            match action {
                ProductCommands::List { expand } => {
                    if let Some(title) = expand {
                        view.toggle_expanded(&title);
                    }
                }
                ProductCommands::SetStatus { id, status } => {
                    let status: ModerationStatus = status.parse()?;
                    view.open_status_edit(id)?;
                    view.set_draft_status(status)?;
                    view.submit_status().await?;
                    println!("Product {id} is now {status}");
                }
            }
        }
        Commands::Users {
            action: UserCommands::List,
        } => {}
        Commands::Businesses { action } => {
            let view = dashboard.businesses()?;
            match action {
                BusinessCommands::List => {}
                BusinessCommands::Show { id } => {
                    view.select(id)?;
                    if let Some(business) = view.details() {
                        print!(
                            "{}",
                            render_business_details(&business, view.collection().client().base_url())
                        );
                    }
                    return Ok(ExitCode::SUCCESS);
                }
                BusinessCommands::SetStatus { id, status } => {
                    let status: ModerationStatus = status.parse()?;
                    view.set_status(id, status).await?;
                    println!("Business {id} is now {status}");
                }
            }
        }
        Commands::Subscriptions { action } => {
            let view = dashboard.subscriptions()?;
            if let SubscriptionCommands::Edit {
                id,
                name,
                weekly,
                monthly,
                yearly,
                active,
            } = action
            {
                view.open_edit(id)?;
                view.update_draft(|draft| {
                    if let Some(name) = name {
                        draft.name = name;
                    }
                    if let Some(price) = weekly {
                        draft.price_weekly = price;
                    }
                    if let Some(price) = monthly {
                        draft.price_monthly = price;
                    }
                    if let Some(price) = yearly {
                        draft.price_yearly = price;
                    }
                    if let Some(active) = active {
                        draft.is_active = active;
                    }
                })?;
                view.submit().await?;
                println!("Subscription {id} updated");
            }
        }
        Commands::Reports { action } => {
            let view = dashboard.reports()?;
            if let ReportCommands::DeleteReview { review_id } = action {
                if view.collection().find(&review_id).is_none() {
                    return Err(DashboardError::NotFound {
                        resource: "report",
                        key: format!("review {review_id}"),
                    });
                }
                view.delete_review(review_id).await?;
                println!("Review {review_id} deleted");
            }
        }
        Commands::Token { .. } => {}
    }

    if let Some(page) = dashboard.page() {
        print!("{}", render::render_page(page));
    }
    Ok(ExitCode::SUCCESS)
}
