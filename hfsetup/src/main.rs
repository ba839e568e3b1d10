//! hfsetup - Hugging Face integration setup for TeraCharacter
//!
//! Writes `./hf_config.json`, creates the local sync directories and the
//! dataset README, and with `--create-dataset` creates the dataset
//! repository on the Hugging Face Hub.
//!
//! Uses XDG Base Directory specification for its own files:
//! - Logs: $XDG_STATE_HOME/hfsetup/hfsetup.log (~/.local/state/hfsetup/hfsetup.log)
//! - Config: $XDG_CONFIG_HOME/hfsetup/config.toml (~/.config/hfsetup/config.toml)

use anyhow::{Context, Result};
use clap::Parser;
use hfsetup_core::{Config, Layout, RemoteOutcome, Setup, SetupEnv, SetupOptions};

#[derive(Parser)]
#[command(name = "hfsetup")]
#[command(about = "Setup Hugging Face integration for TeraCharacter")]
#[command(version)]
struct Args {
    /// Create the dataset on Hugging Face
    #[arg(long)]
    create_dataset: bool,

    /// Only create configuration files
    #[arg(long)]
    config_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Tool settings and the log file are conveniences; neither may stop setup
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

    let options = SetupOptions {
        create_dataset: args.create_dataset,
        config_only: args.config_only,
    };
    tracing::info!(?options, "hfsetup starting");

    println!("🚀 Setting up Hugging Face integration for TeraCharacter...\n");

    let setup = Setup::new(Layout::new("."), SetupEnv::from_env(), config.hub);

    let (config_path, _) = setup
        .build_configuration()
        .context("failed to write HF configuration file")?;
    println!("✅ Created HF configuration file: {}", config_path.display());

    let dirs = setup
        .establish_layout()
        .context("failed to create local directories")?;
    for dir in &dirs {
        println!("✅ Created directory: {}", dir.display());
    }
    println!("✅ Created README: {}", setup.layout().readme_path().display());

    if options.wants_remote() {
        println!("\n📡 Creating Hugging Face dataset...");
        let outcome = setup.create_remote_dataset();
        report_outcome(&outcome);

        if outcome.succeeded() {
            println!("\n🎉 Hugging Face setup completed successfully!");
            println!("\nNext steps:");
            println!("1. Set your HF_TOKEN environment variable");
            println!("2. Run 'npm run hf:sync' to sync your data");
            println!("3. Configure your Next.js app to use HF storage");
        } else {
            println!("\n⚠️  Dataset creation failed. Please check your HF_TOKEN and try again.");
        }
    } else {
        println!("\n✅ Configuration setup completed!");
        println!("\nTo complete setup:");
        println!("1. Set your HF_TOKEN environment variable");
        println!("2. Run with --create-dataset to create the dataset");
        println!("3. Run 'npm run hf:sync' to sync your data");
    }

    tracing::info!("hfsetup finished");
    Ok(())
}

fn report_outcome(outcome: &RemoteOutcome) {
    match outcome {
        RemoteOutcome::Created {
            repo_id,
            url,
            record_updated,
        } => {
            println!("✅ Created dataset: {}", repo_id);
            println!("   {}", url);
            if !record_updated {
                println!("⚠️  No HF configuration file found, completion was not recorded");
            }
        }
        RemoteOutcome::MissingDependency => {
            println!(
                "❌ Hugging Face client not available in this build. Rebuild with: cargo install hfsetup --features hub"
            );
        }
        RemoteOutcome::MissingCredential => {
            println!("❌ HF_TOKEN not found in environment variables");
        }
        RemoteOutcome::Failed(e) => {
            println!("❌ Error creating dataset: {}", e);
        }
    }
}
