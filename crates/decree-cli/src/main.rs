//! Decree - Branch Policy Manager
//!
//! Usage:
//!   decree list            # List policy configurations
//!   decree show <id>       # Print a policy's raw record
//!   decree promote <id>    # Promote a policy to a global policy
//!   decree delete <id>     # Delete a policy
//!   decree config init     # Write a config template

mod confirm;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use decree_core::auth::EnvTokenProvider;
use decree_core::config::{ConfigOverrides, ConfigStore, DecreeConfig, to_toml};
use decree_core::model::PolicyConfiguration;
use decree_core::render::{Column, ContextAction};
use decree_core::session::{ListingOutcome, Session};
use decree_core::workflow::{DeletionOutcome, PromotionOutcome};

use crate::confirm::Confirmer;

#[derive(Parser)]
#[command(name = "decree")]
#[command(about = "Branch Policy Manager", long_about = None)]
struct Cli {
    /// Path to decree.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ConnectionArgs {
    /// Organization URL (e.g. https://dev.azure.com/fabrikam/)
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Project name
    #[arg(long, short, global = true)]
    project: Option<String>,

    /// Display name used in permission messages
    #[arg(long, global = true)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the project's policy configurations
    #[command(alias = "ls")]
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the raw record of a policy
    #[command(alias = "open")]
    Show {
        /// Policy configuration id
        id: i64,
    },

    /// Promote a policy to a global policy by clearing its scope
    Promote {
        /// Policy configuration id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete a policy
    #[command(alias = "rm")]
    Delete {
        /// Policy configuration id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage decree.toml
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Write a config template
    Init {
        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "decree=info,decree_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::with_defaults()?,
    };

    let overrides = ConfigOverrides {
        organization: cli.connection.organization,
        project: cli.connection.project,
        user_name: cli.connection.user,
    };

    let command = match cli.command {
        Commands::Config(args) => return run_config(&store, args, overrides),
        Commands::List { format } => PolicyCommand::List { format },
        Commands::Show { id } => PolicyCommand::Show { id },
        Commands::Promote { id, yes } => PolicyCommand::Promote { id, yes },
        Commands::Delete { id, yes } => PolicyCommand::Delete { id, yes },
    };

    let mut config = store.load()?;
    config.apply(overrides);
    config.require_complete()?;
    tracing::debug!(
        path = %store.config_path().display(),
        project = %config.project,
        "loaded configuration"
    );
    run_command(&config, command).await
}

/// Commands that work on the loaded policy listing.
enum PolicyCommand {
    List { format: OutputFormat },
    Show { id: i64 },
    Promote { id: i64, yes: bool },
    Delete { id: i64, yes: bool },
}

impl PolicyCommand {
    /// Whether an empty listing is already the full answer.
    fn done_when_empty(&self) -> bool {
        matches!(self, PolicyCommand::List { .. })
    }
}

async fn run_command(config: &DecreeConfig, command: PolicyCommand) -> Result<()> {
    let tokens = EnvTokenProvider::new(config.token.env.clone(), config.token.kind);
    let mut session = Session::from_config(config, tokens)?;

    match session.load().await {
        ListingOutcome::Loaded { .. } => {}
        ListingOutcome::Empty { message, .. } if command.done_when_empty() => {
            println!("Total policies: 0");
            println!("{message}");
            return Ok(());
        }
        // The id lookup below fails on an empty listing.
        ListingOutcome::Empty { message, .. } => eprintln!("{message}"),
        ListingOutcome::Failed { message } => anyhow::bail!(message),
    }

    match command {
        PolicyCommand::List { format } => print_listing(&session, format)?,
        PolicyCommand::Show { id } => println!("{}", session.details(id)?),
        PolicyCommand::Promote { id, yes } => run_promote(&mut session, id, yes).await?,
        PolicyCommand::Delete { id, yes } => run_delete(&mut session, id, yes).await?,
    }

    Ok(())
}

async fn run_promote(
    session: &mut Session<EnvTokenProvider>,
    id: i64,
    yes: bool,
) -> Result<()> {
    let mut promotion = session.begin_promotion(id)?;
    let text = promotion.summary().confirmation_text();

    if Confirmer::new(yes).confirm("Promote Policy Confirmation", &text, "Promote")? {
        promotion.confirm()?;
    } else {
        promotion.cancel()?;
    }

    match session.promote(&mut promotion).await? {
        PromotionOutcome::Cancelled => println!("Promotion cancelled."),
        PromotionOutcome::Succeeded { message } => println!("✓ {message}"),
        PromotionOutcome::Failed { message } => anyhow::bail!(message),
    }
    Ok(())
}

async fn run_delete(session: &mut Session<EnvTokenProvider>, id: i64, yes: bool) -> Result<()> {
    let mut deletion = session.begin_deletion(id)?;
    let text = deletion.confirmation_text();

    if Confirmer::new(yes).confirm("Delete Policy Confirmation", &text, "Delete")? {
        deletion.confirm()?;
    } else {
        deletion.cancel()?;
    }

    match session.delete(&mut deletion).await? {
        DeletionOutcome::Cancelled => println!("Delete cancelled."),
        DeletionOutcome::Succeeded { message } => println!("✓ {message}"),
        DeletionOutcome::Failed { message } => anyhow::bail!(message),
    }
    Ok(())
}

fn print_listing(session: &Session<EnvTokenProvider>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_policy_table(session.policies(), session.total()),
        OutputFormat::Json => {
            let rows: Vec<_> = session.policies().iter().map(policy_json).collect();
            let output = serde_json::json!({
                "project": session.project(),
                "count": session.total(),
                "policies": rows,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_policy_table(policies: &[PolicyConfiguration], total: usize) {
    println!("Total policies: {total}");
    println!();

    let mut header = format!("{:<6}", "Id");
    for column in Column::ALL {
        header.push_str(&format!("{:<width$} ", column.header(), width = column.width() as usize));
    }
    println!("{}", header.trim_end());
    println!("{}", "-".repeat(header.len()));

    for policy in policies {
        let mut line = format!("{:<6}", policy.id);
        for column in Column::ALL {
            let width = column.width() as usize;
            line.push_str(&format!("{:<width$} ", truncate(&column.cell(policy), width)));
        }
        println!("{}", line.trim_end());
    }

    println!();
    let actions: Vec<_> = ContextAction::ALL
        .iter()
        .map(|action| action.label())
        .collect();
    println!("Actions: {} (decree show | promote | delete <id>)", actions.join(", "));
}

fn policy_json(policy: &PolicyConfiguration) -> serde_json::Value {
    serde_json::json!({
        "id": policy.id,
        "type": policy.type_name(),
        "global": policy.is_global(),
        "repositories": policy
            .matched_repositories
            .iter()
            .map(|repo| repo.name.as_str())
            .collect::<Vec<_>>(),
        "createdBy": policy.created_by.display_name,
        "createdDate": policy.created_date.to_rfc3339(),
    })
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}

fn run_config(store: &ConfigStore, args: ConfigArgs, overrides: ConfigOverrides) -> Result<()> {
    match args.command {
        ConfigSubcommand::Init { force } => {
            if store.exists() && !force {
                anyhow::bail!(
                    "Config file already exists: {} (use --force to overwrite)",
                    store.config_path().display()
                );
            }
            let mut config = DecreeConfig::template();
            config.apply(overrides);
            store.save(&config)?;
            println!("Wrote {}", store.config_path().display());
        }
        ConfigSubcommand::Show => {
            let mut config = store.load()?;
            config.apply(overrides);
            println!("# {}", store.config_path().display());
            print!("{}", to_toml(&config)?);
        }
    }
    Ok(())
}
