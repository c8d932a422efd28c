//! Bootstrap host CLI
//!
//! Runs the application startup chain once: resolve and apply the service API
//! key, register plugins, then exit with the continuation signal
//! (0 = continue, 1 = abort).

use anyhow::Context;
use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

use bootstrap_core::{LaunchContext, RecordingService, SettingsLoader};
use bootstrap_host::{parse_launch_option, StartupHost};
use serde_json::Value;

/// Application bootstrap host - resolves the maps API key and runs startup
#[derive(Parser, Debug)]
#[command(name = "bootstrap-host")]
#[command(author = "Symbia Labs")]
#[command(version = "0.1.0")]
#[command(about = "Run the application startup chain once")]
struct Args {
    /// Directory holding the bundled resource and Info.json
    /// (default: the executable's directory)
    #[arg(long)]
    resource_dir: Option<PathBuf>,

    /// Settings file (default: bootstrap.json in the platform config directory)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Launch option passed through to the startup chain (key=value, repeatable)
    #[arg(long = "launch-option", value_parser = parse_launch_option)]
    launch_options: Vec<(String, Value)>,

    /// Plugins to register after bootstrap
    #[arg(long = "plugin", default_values_t = [String::from("maps")])]
    plugins: Vec<String>,

    /// Do not install a log subscriber
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    if !args.quiet {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();
    }

    let loader = match &args.settings {
        Some(path) => SettingsLoader::open(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => match ProjectDirs::from("com", "symbia-labs", "app-bootstrap") {
            Some(dirs) => SettingsLoader::new(dirs.config_dir()),
            None => SettingsLoader::new(&std::env::current_dir()?),
        },
    };
    debug!("Settings from {:?}", loader.settings_file());
    let mut settings = loader.into_settings();

    if let Some(dir) = args.resource_dir {
        settings.resource_dir = Some(dir);
    } else if settings.resource_dir.is_none() {
        let exe = std::env::current_exe().context("Failed to locate executable")?;
        settings.resource_dir = exe.parent().map(PathBuf::from);
    }

    let launch = args
        .launch_options
        .into_iter()
        .fold(LaunchContext::new(), |ctx, (key, value)| ctx.with_option(&key, value));

    let service = Arc::new(RecordingService::new("maps"));
    let host = StartupHost::new(settings, service).with_plugins(args.plugins);
    let outcome = host.run(&launch);

    info!(
        "Bootstrap finished: configured={} source={}",
        outcome.report.configured,
        outcome.report.source.as_deref().unwrap_or("none")
    );

    Ok(if outcome.result.should_continue() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}
