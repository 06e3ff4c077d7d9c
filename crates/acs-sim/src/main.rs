mod config;
mod driver;

use std::fs;
use std::path::PathBuf;

use acs::{AcsController, ControllerState};
use acs_types::{AcsOutcome, Channel, InterfaceState};
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::SimConfig;
use driver::{SimBringUp, SimDriver};

#[derive(Parser, Debug)]
#[command(name = "acs-sim", about = "Run the ACS decision engine against a simulated driver")]
struct Cli {
    /// TOML fixture file; falls back to a built-in three-channel scenario.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured number of survey passes.
    #[arg(long)]
    passes: Option<u32>,

    /// Override the configured per-channel dwell time, in milliseconds.
    #[arg(long)]
    dwell_ms: Option<u32>,

    /// Print the final per-channel scores after the decision.
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "acs=info,acs_sim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut sim_config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    if let Some(passes) = cli.passes {
        sim_config.passes = passes;
    }
    if let Some(dwell_ms) = cli.dwell_ms {
        sim_config.dwell_ms = dwell_ms;
    }

    let channels: Vec<Channel> = sim_config
        .channels
        .iter()
        .map(|c| Channel::new(c.chan, c.freq_mhz, config::channel_flags(c)))
        .collect();

    let mut driver = SimDriver::new(&sim_config).context("building simulated driver")?;
    let iface = InterfaceState::new(
        channels,
        sim_config.acs_config(),
        acs_types::DriverCapabilities::OFFCHANNEL_TX | acs_types::DriverCapabilities::AP,
    );

    let mut controller = AcsController::new(iface, Box::new(SimBringUp));
    if cli.trace {
        controller = controller.with_trace();
    }

    let outcome = run_to_completion(&mut controller, &mut driver);

    match outcome {
        AcsOutcome::Valid => {
            println!(
                "selected channel: {:?}",
                controller.interface().selected_channel
            );
        }
        AcsOutcome::Invalid => {
            println!(
                "no channel selected: {}",
                controller
                    .last_error()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| "unknown error".to_string())
            );
        }
        AcsOutcome::Acs => unreachable!("run_to_completion only returns once driving is done"),
    }

    if cli.trace {
        if let Some(trace) = controller.trace() {
            for entry in trace {
                println!("{:>14} chan={:?} factor={:?}", entry.phase, entry.chan, entry.factor);
            }
        }
    }

    Ok(())
}

/// Drives the controller's event hooks to completion, standing in for the
/// real driver's asynchronous completion callbacks. The simulated driver
/// answers every request synchronously, so each hook can be invoked
/// immediately after the one that triggers it.
fn run_to_completion(ctrl: &mut AcsController, driver: &mut SimDriver) -> AcsOutcome {
    let mut outcome = ctrl.init(driver);

    loop {
        if outcome != AcsOutcome::Acs {
            return outcome;
        }
        match ctrl.state() {
            ControllerState::InitialScan => {
                outcome = ctrl.on_scan_complete(driver);
            }
            ControllerState::Surveying => {
                let freq = ctrl
                    .interface()
                    .channels
                    .get(ctrl.interface().off_channel_freq_idx)
                    .map(|c| c.freq_mhz)
                    .expect("cursor points at the channel just dwelled on");
                outcome = ctrl.on_roc_started(0);
                if outcome != AcsOutcome::Acs {
                    return outcome;
                }
                outcome = ctrl.on_roc_cancelled(freq, 0, driver);
            }
            other => unreachable!("controller left in unexpected state {other:?} mid-drive"),
        }
    }
}
