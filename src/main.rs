use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Password, Text};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use momo_wallet::api::{AccountClient, ProfileUpdate};
use momo_wallet::config::{WalletConfig, API_URL_ENV};
use momo_wallet::error::ApiError;
use momo_wallet::logging;
use momo_wallet::platform::DesktopPlatform;
use momo_wallet::session::UserProfile;
use momo_wallet::shell::App;

#[derive(Parser)]
#[command(name = "momo-wallet")]
#[command(author, version)]
#[command(about = "Mobile money wallet for the terminal")]
#[command(long_about = None)]
#[command(after_help = format!("\n{}\n  {} {}\n  {} {}\n  {} {}\n\n{}\n  {}\n  {}\n",
    "GETTING STARTED:".bright_yellow().bold(),
    "1.".bright_yellow(), "momo-wallet login".bright_white(),
    "2.".bright_yellow(), "momo-wallet profile show".bright_white(),
    "3.".bright_yellow(), "momo-wallet".bright_white(),
    "FILES:".bright_yellow().bold(),
    "~/.momo/config.json   # API URL and session token".dimmed(),
    "~/.momo/momo.log      # Log output (MOMO_LOG=debug for more)".dimmed(),
))]
#[command(styles = get_styles())]
struct Cli {
    /// Account API base URL (overrides the config file and MOMO_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the full-screen wallet (default)
    Shell,

    /// Sign in and store the session token
    Login {
        /// Phone number (prompted when omitted)
        #[arg(long)]
        phone: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show or edit the account profile
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Change the account password
    Password,

    /// Configure default settings
    Config {
        /// Set the default API base URL
        #[arg(long)]
        api_url: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// Print the signed-in account
    Show,

    /// Update name, email or phone
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,
    },
}

fn get_styles() -> clap::builder::Styles {
    use clap::builder::styling::*;
    clap::builder::Styles::styled()
        .header(AnsiColor::BrightYellow.on_default().bold())
        .usage(AnsiColor::BrightYellow.on_default().bold())
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::BrightRed.on_default().bold())
        .valid(AnsiColor::BrightCyan.on_default())
        .invalid(AnsiColor::BrightYellow.on_default())
}

fn print_section(title: &str) {
    println!("{}", format!("▓▒░ {} ░▒▓", title).bright_yellow().bold());
    println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".dimmed());
    println!();
}

/// Print the server message and, for validation failures, every field.
fn print_api_error(e: &ApiError) {
    eprintln!("{} {}", "Error:".red().bold(), e);
    for (field, message) in e.field_errors() {
        eprintln!("  {} {}", format!("{field}:").yellow(), message);
    }
    if matches!(e, ApiError::MissingToken) {
        eprintln!("  Run {} first.", "momo-wallet login".bright_white());
    }
}

fn exit_with(e: ApiError) -> ! {
    warn!("command failed: {e}");
    print_api_error(&e);
    std::process::exit(1);
}

async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.yellow} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let output = future.await;
    spinner.finish_and_clear();
    output
}

fn authorized_client(config: &WalletConfig, api_url: &str) -> Result<AccountClient> {
    let Some(token) = config.token.clone() else {
        exit_with(ApiError::MissingToken);
    };
    Ok(AccountClient::new(api_url, None)?.with_token(token))
}

fn print_profile(user: &UserProfile) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Field".bright_white().to_string(),
        "Value".bright_white().to_string(),
    ]);

    let verified = if user.is_verified {
        "yes".bright_green().to_string()
    } else {
        "no".bright_red().to_string()
    };
    let rows = [
        ("Name", user.name.clone()),
        ("Email", user.email.clone().unwrap_or_else(|| "---".to_string())),
        ("Phone", user.phone.clone()),
        ("Verified", verified),
        ("Balance", user.balance.clone().unwrap_or_else(|| "---".to_string())),
        ("Member since", user.created_at.clone().unwrap_or_else(|| "---".to_string())),
    ];
    for (field, value) in rows {
        table.add_row(vec![field.bright_yellow().to_string(), value]);
    }

    println!("{}", table);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home = WalletConfig::home_dir()?;
    if let Err(e) = logging::init(&home) {
        eprintln!("{} {:#}", "Warning:".yellow().bold(), e);
    }

    let config_path = WalletConfig::config_path()?;
    let mut config = WalletConfig::load_from(&config_path)?;
    let api_url = config.resolve_api_url(cli.api_url.as_deref());
    info!(api_url = %api_url, "momo-wallet starting");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => cmd_shell(config, config_path, &api_url)?,

        Commands::Login { phone } => {
            print_section("SIGN IN");
            cmd_login(&mut config, &config_path, &api_url, phone).await?;
        }

        Commands::Logout => {
            if config.token.is_none() {
                println!("{}", "Not signed in.".dimmed());
            } else {
                config.clear_login();
                config.save_to(&config_path)?;
                info!("signed out from cli");
                println!("{} Signed out", "✓".green().bold());
            }
        }

        Commands::Profile { action: ProfileCommand::Show } => {
            print_section("PROFILE");
            let client = authorized_client(&config, &api_url)?;
            let user = with_spinner("Loading profile...", client.get_profile())
                .await
                .unwrap_or_else(|e| exit_with(e));
            print_profile(&user);
        }

        Commands::Profile { action: ProfileCommand::Update { name, email, phone } } => {
            print_section("UPDATE PROFILE");
            let update = ProfileUpdate { name, email, phone };
            if update.is_empty() {
                bail!("Nothing to update: pass --name, --email or --phone");
            }

            let client = authorized_client(&config, &api_url)?;
            let response = with_spinner("Saving profile...", client.update_profile(&update))
                .await
                .unwrap_or_else(|e| exit_with(e));

            println!("{} {}", "✓".green().bold(), response.message);
            for change in &response.changes {
                println!("  {} {}", "•".bright_yellow(), change);
            }
            println!();
            print_profile(&response.user);
        }

        Commands::Password => {
            print_section("CHANGE PASSWORD");
            cmd_password(&config, &api_url).await?;
        }

        Commands::Config { api_url: new_url, show } => {
            print_section("CONFIGURATION");

            if let Some(url) = new_url {
                // reject unusable URLs before saving
                AccountClient::new(&url, None)?;
                config.api_url = url.clone();
                config.save_to(&config_path)?;

                println!("{} Default API URL set to:", "✓".green().bold());
                println!("  {}", url.yellow());
                println!();
                println!("Saved to: {}", config_path.display().to_string().dimmed());
            } else if show {
                println!("{} {}", "Config file:".bold(), config_path.display().to_string().dimmed());
                println!("{} {}", "API URL:".bold(), config.api_url.yellow());
                if api_url != config.api_url {
                    println!("{} {} {}", "In use:".bold(), api_url.yellow(), format!("(--api-url or {API_URL_ENV})").dimmed());
                }
                println!(
                    "{} {}",
                    "Signed in:".bold(),
                    if config.token.is_some() { "yes".green() } else { "no".red() }
                );
                println!("{} {}", "Last login:".bold(), config.last_login.as_deref().unwrap_or("never").dimmed());
                println!(
                    "{} {}",
                    "Networks:".bold(),
                    config.networks.iter().map(|n| n.name.as_str()).collect::<Vec<_>>().join(", ")
                );
            } else {
                println!("{}", "Usage:".bold());
                println!("  momo-wallet config --api-url <URL>  # Set default API URL");
                println!("  momo-wallet config --show           # Show current config");
            }
        }
    }

    Ok(())
}

fn cmd_shell(config: WalletConfig, config_path: PathBuf, api_url: &str) -> Result<()> {
    let client = AccountClient::new(api_url, config.token.clone())?;
    let mut app = App::new(config, Some(config_path), client, Box::new(DesktopPlatform::new()))?;

    // the UI loop blocks; spawned requests keep running on the worker threads
    tokio::task::block_in_place(|| app.run())
}

async fn cmd_login(config: &mut WalletConfig, config_path: &Path, api_url: &str, phone: Option<String>) -> Result<()> {
    let phone = match phone {
        Some(phone) => phone,
        None => Text::new("Phone number:").prompt()?,
    };
    let password = Password::new("Password:").without_confirmation().prompt()?;

    let client = AccountClient::new(api_url, None)?;
    let response = with_spinner("Signing in...", client.login(phone.trim(), &password))
        .await
        .unwrap_or_else(|e| exit_with(e));

    config.record_login(response.token);
    config.save_to(config_path)?;
    info!(user_id = response.user.id, "signed in from cli");

    println!("{} Signed in as {}", "✓".green().bold(), response.user.name.bright_white().bold());
    if !response.user.is_verified {
        println!("  {}", "Your account is not verified yet. Withdrawals and transfers stay locked.".dimmed());
    }
    println!();
    println!("{} {}", "Next step:".bright_yellow().bold(), "momo-wallet".bright_white().bold());

    Ok(())
}

async fn cmd_password(config: &WalletConfig, api_url: &str) -> Result<()> {
    let client = authorized_client(config, api_url)?;

    let old_password = Password::new("Current password:").without_confirmation().prompt()?;
    let new_password = Password::new("New password:")
        .with_custom_confirmation_message("Repeat new password:")
        .with_custom_confirmation_error_message("The passwords don't match.")
        .prompt()?;

    if old_password == new_password {
        bail!("The new password must differ from the current one");
    }

    let response = with_spinner("Updating password...", client.update_password(&old_password, &new_password))
        .await
        .unwrap_or_else(|e| exit_with(e));

    println!("{} {}", "✓".green().bold(), response.message);
    Ok(())
}
