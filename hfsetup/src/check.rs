//! hfsetup-check - report the state of the Hugging Face integration
//!
//! Read-only. Shows which credentials are set, what `hf_config.json`
//! says, whether the local layout exists, and whether the Hub accepts the
//! token. Never prints the token itself.

use anyhow::{Context, Result};
use clap::Parser;
use hfsetup_core::config::{DATASET_NAME_VAR, TOKEN_VAR};
use hfsetup_core::{Config, HubConfig, Layout, SetupEnv, SetupRecord};

#[derive(Parser)]
#[command(name = "hfsetup-check")]
#[command(about = "Check the Hugging Face integration for TeraCharacter")]
#[command(version)]
struct Args {
    /// Skip the Hub connection test
    #[arg(long)]
    offline: bool,
}

/// Result of the Hub connection test
enum Connection {
    Skipped,
    Connected(String),
    Failed(String),
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Tool settings and the log file are conveniences; neither may stop the check
    let (config, config_error) = Config::load_or_default();
    if let Some(e) = &config_error {
        eprintln!("⚠️  Ignoring {}: {}", Config::config_path().display(), e);
    }

    let _log_guard = match hfsetup_core::logging::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("⚠️  File logging disabled: {}", e);
            None
        }
    };
    if let Some(e) = &config_error {
        tracing::warn!(error = %e, "tool config ignored, using defaults");
    }

    tracing::info!(offline = args.offline, "hfsetup-check starting");

    let env = SetupEnv::from_env();
    let layout = Layout::new(".");

    println!("Hugging Face Integration Check");
    println!("==============================");

    print_environment(&env, &config.hub);
    print_record(&layout)?;
    print_layout(&layout);

    let connection = if args.offline {
        Connection::Skipped
    } else {
        test_connection(&env, &config.hub)
    };

    println!();
    println!("Hub Connection");
    match &connection {
        Connection::Skipped => println!("  Skipped"),
        Connection::Connected(account) => println!("  ✅ Authenticated as {}", account),
        Connection::Failed(reason) => println!("  ❌ {}", reason),
    }

    println!();
    let status = match (env.usable_token().is_some(), &connection) {
        (false, _) => "❌ Not configured",
        (true, Connection::Connected(_)) => "✅ Ready",
        (true, Connection::Skipped) => "Configured (connection not tested)",
        (true, Connection::Failed(_)) => "⚠️  Configured but connection failed",
    };
    println!("Status: {}", status);

    if env.usable_token().is_none() {
        println!();
        println!("Set {} and run 'hfsetup --create-dataset'.", TOKEN_VAR);
    }

    Ok(())
}

fn print_environment(env: &SetupEnv, hub: &HubConfig) {
    println!();
    println!("Environment");
    println!(
        "  {}:        {}",
        TOKEN_VAR,
        if env.usable_token().is_some() {
            "✅ Set"
        } else {
            "❌ Not set"
        }
    );
    println!("  {}: {}", DATASET_NAME_VAR, env.dataset_name);
    println!("  Hub endpoint:    {}", hub.endpoint);
}

fn print_record(layout: &Layout) -> Result<()> {
    let path = layout.config_path();

    println!();
    println!("Setup Record ({})", path.display());

    if !path.exists() {
        println!("  ❌ Missing (run 'hfsetup' first)");
        return Ok(());
    }

    match SetupRecord::load(&path) {
        Ok(record) => {
            println!("  Dataset:         {}", record.hf_dataset_name);
            println!(
                "  Token:           {}",
                if record.has_token() { "<set>" } else { "<not set>" }
            );
            println!("  Completed:       {}", record.setup_completed);
            println!(
                "  Repository:      {}",
                record.repo_id.as_deref().unwrap_or("<not created>")
            );
        }
        Err(hfsetup_core::Error::Json(e)) => {
            println!("  ❌ Unreadable: {}", e);
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    }

    Ok(())
}

fn print_layout(layout: &Layout) {
    println!();
    println!("Local Layout");
    for (path, present) in layout.inspect() {
        println!(
            "  {} {}",
            if present { "✅" } else { "❌" },
            path.display()
        );
    }
}

#[cfg(feature = "hub")]
fn test_connection(env: &SetupEnv, hub: &HubConfig) -> Connection {
    use hfsetup_core::hub::BlockingHubClient;

    let Some(token) = env.usable_token() else {
        return Connection::Failed(format!("No {} found. Cannot test connection.", TOKEN_VAR));
    };

    match BlockingHubClient::new(hub, token).and_then(|client| client.whoami()) {
        Ok(account) => {
            tracing::info!(account = %account.name, "Hub connection ok");
            Connection::Connected(account.name)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Hub connection failed");
            Connection::Failed(format!("Connection error: {}", e))
        }
    }
}

#[cfg(not(feature = "hub"))]
fn test_connection(_env: &SetupEnv, _hub: &HubConfig) -> Connection {
    Connection::Failed("Hugging Face client not available in this build".to_string())
}
