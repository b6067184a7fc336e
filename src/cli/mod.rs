use std::net::SocketAddr;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio::signal;

use crate::application::AccountService;
use crate::domain::{Account, AccountDraft, AccountType};
use crate::rpc;

/// Bankbook - bank account record service
#[derive(Parser)]
#[command(name = "bankbook")]
#[command(about = "Bank account records served over JSON procedure calls")]
#[command(version)]
pub struct Cli {
    /// Database URL
    #[arg(
        short,
        long,
        env = "BANKBOOK_DATABASE",
        default_value = "sqlite:bankbook.db",
        global = true
    )]
    pub database: String,

    /// Log filter when RUST_LOG is unset (e.g. "info", "bankbook=debug")
    #[arg(long, env = "BANKBOOK_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed sample accounts and serve the procedure-call API
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "BANKBOOK_LISTEN", default_value = "127.0.0.1:9090")]
        listen: SocketAddr,

        /// Keep existing rows instead of loading the sample accounts
        #[arg(long)]
        no_seed: bool,
    },

    /// Replace all accounts with the sample fixture
    Seed,

    /// Account commands against the local database
    #[command(subcommand)]
    Accounts(AccountCommands),

    /// Show balance statistics
    Stats,
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts
    List,

    /// Show one account
    Show {
        /// Account ID
        id: String,
    },

    /// Create an account
    Create {
        /// Opening balance (e.g. "2500.75")
        #[arg(short, long, allow_negative_numbers = true)]
        balance: f64,

        /// Account type: current, savings
        #[arg(short = 't', long = "type")]
        account_type: String,

        /// Creation date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let service = AccountService::init(&self.database)
            .await
            .with_context(|| format!("Failed to open database {}", self.database))?;

        match self.command {
            Commands::Serve { listen, no_seed } => {
                if !no_seed {
                    service.seed_sample_accounts().await?;
                }
                serve(service, listen).await?;
            }

            Commands::Seed => {
                let accounts = service.seed_sample_accounts().await?;
                println!("Seeded {} accounts", accounts.len());
            }

            Commands::Accounts(cmd) => run_account_command(&service, cmd).await?,

            Commands::Stats => {
                let stats = service.compute_statistics().await?;
                println!("Accounts: {}", stats.count);
                println!("Total:    {:.2}", stats.sum);
                println!("Average:  {:.2}", stats.average);
            }
        }

        Ok(())
    }
}

async fn run_account_command(service: &AccountService, cmd: AccountCommands) -> Result<()> {
    match cmd {
        AccountCommands::List => {
            let accounts = service.list_accounts().await?;
            if accounts.is_empty() {
                println!("No accounts found.");
            } else {
                println!("{:<38} {:<8} {:<12} {:>14}", "ID", "TYPE", "CREATED", "BALANCE");
                println!("{}", "-".repeat(75));
                for account in accounts {
                    println!(
                        "{:<38} {:<8} {:<12} {:>14.2}",
                        account.id, account.account_type, account.creation_date, account.balance
                    );
                }
            }
        }

        AccountCommands::Show { id } => match service.get_account(&id).await? {
            Some(account) => print_account(&account),
            None => anyhow::bail!("Account with ID '{}' does not exist", id),
        },

        AccountCommands::Create {
            balance,
            account_type,
            date,
        } => {
            let account_type = AccountType::from_str(&account_type).ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid account type '{}'. Valid types: current, savings",
                    account_type
                )
            })?;
            let date = date.unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

            let account = service
                .create_account(AccountDraft::new(balance, date, account_type))
                .await?;
            println!("Created account: {} ({})", account.id, account.account_type);
        }
    }

    Ok(())
}

fn print_account(account: &Account) {
    println!("Account: {}", account.id);
    println!("  Type:     {}", account.account_type);
    println!("  Created:  {}", account.creation_date);
    println!("  Balance:  {:.2}", account.balance);
}

/// Serve until Ctrl+C or SIGTERM. The caller seeds before this runs, so the
/// listener only opens once the table is ready.
pub async fn serve(service: AccountService, listen: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {}", address),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    axum::serve(listener, rpc::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
