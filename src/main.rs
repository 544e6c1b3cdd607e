//! xr-bridge CLI entry point.
//!
//! Drives the bridge against the simulated application, the same call
//! sequence an activity produces, and validates configuration files before
//! they are pushed to a device.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xr_bridge_common::{CONFIG_ENV_VAR, ConfigFile};
use xr_bridge_core::{
    AssetSource, Bridge, Call, DisplayGeometry, ResumeTarget, SimulatedFactory, TouchEvent,
};

#[derive(Parser)]
#[command(name = "xr-bridge")]
#[command(about = "Lifecycle bridge tooling", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,

    /// Enable JSON logging
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one simulated activity lifecycle
    Simulate {
        /// Frames to draw between resume and pause
        #[arg(short, long, default_value_t = 60)]
        frames: u32,

        /// Launch options delivered after creation
        #[arg(long)]
        launch_options: Option<String>,

        /// Arguments delivered after resume
        #[arg(long)]
        args: Option<String>,

        /// External storage directory passed at creation
        #[arg(long, default_value = "")]
        external_dir: String,

        /// Deliver a touch every N frames (0 disables touches)
        #[arg(long, default_value_t = 15)]
        touch_every: u32,
    },

    /// Parse a configuration file and print the effective settings
    CheckConfig {
        /// File to check
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = load_config(cli.config.as_deref())?;
    init_tracing(&file, cli.json);

    match cli.command {
        Command::Simulate {
            frames,
            launch_options,
            args,
            external_dir,
            touch_every,
        } => simulate(
            &file,
            &SimulateOptions {
                frames,
                launch_options,
                args,
                external_dir,
                touch_every,
            },
        ),
        Command::CheckConfig { path } => check_config(&path),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigFile> {
    match path {
        Some(path) => ConfigFile::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(ConfigFile::default()),
    }
}

fn init_tracing(file: &ConfigFile, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| file.bridge.logging.filter.clone().into());

    if json || file.bridge.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

struct SimulateOptions {
    frames: u32,
    launch_options: Option<String>,
    args: Option<String>,
    external_dir: String,
    touch_every: u32,
}

fn simulate(file: &ConfigFile, options: &SimulateOptions) -> anyhow::Result<()> {
    let factory = SimulatedFactory::new(file.simulation.clone());
    let journal = factory.journal();
    let bridge = Bridge::new(Box::new(factory), &file.bridge);

    info!(frames = options.frames, "Starting simulated lifecycle");

    let handle = bridge
        .create(AssetSource::default(), Some(&options.external_dir))
        .context("Failed to create application")?;
    bridge.handle_launch_options(handle, options.launch_options.as_deref())?;
    bridge.resume(handle, ResumeTarget::default())?;
    if options.args.is_some() {
        bridge.set_args(handle, options.args.as_deref())?;
    }
    bridge.surface_created(handle)?;
    bridge.display_geometry_changed(
        handle,
        DisplayGeometry {
            rotation: 0,
            width: 1080,
            height: 2400,
        },
    )?;

    let mut failed_frames = 0_u32;
    for frame in 1..=options.frames {
        let status = bridge.draw_frame(handle)?;
        if !status.is_success() {
            failed_frames += 1;
            debug!(frame, status = %status, "Frame not drawn");
        }
        if options.touch_every != 0 && frame % options.touch_every == 0 {
            bridge.touched(
                handle,
                TouchEvent {
                    x: 540.0,
                    y: 1200.0,
                    long_press: false,
                },
            )?;
        }
    }

    let server = bridge.server_address(handle)?;
    let planes = bridge.has_detected_planes(handle)?;

    bridge.pause(handle)?;
    bridge.destroy(handle)?;

    let calls = journal.snapshot();
    let touches = calls
        .iter()
        .filter(|call| matches!(call, Call::Touched(_)))
        .count();

    println!("handle:          {handle}");
    println!("server address:  {server}");
    println!("frames drawn:    {}", options.frames - failed_frames);
    println!("frames failed:   {failed_frames}");
    println!("touches:         {touches}");
    println!("planes detected: {planes}");
    println!("calls recorded:  {}", calls.len());

    Ok(())
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let file = ConfigFile::from_file(path)
        .with_context(|| format!("Invalid configuration file {}", path.display()))?;

    let bridge = &file.bridge;
    println!("{} is valid", path.display());
    println!("registry.max_instances = {}", bridge.registry.max_instances);
    println!("lifecycle.init_failure = {:?}", bridge.lifecycle.init_failure);
    println!("jni.exception_class    = {}", bridge.jni.exception_class);
    println!("jni.panic_class        = {}", bridge.jni.panic_class);
    println!("logging.filter         = {}", bridge.logging.filter);
    println!("logging.json           = {}", bridge.logging.json);
    println!("simulation.server      = {}", file.simulation.server_address);
    Ok(())
}
