//! Aetherius - Entry Point
//!
//! Loads the agent configuration, seeds the demonstration world and pumps
//! agent cycles until the cycle limit or Ctrl-C.

use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use aetherius::agent::AutonomousAgent;
use aetherius::core::config::AgentConfig;
use aetherius::core::error::Result;
use aetherius::simulation::{attach_http_capabilities, prime_agent, seed_environment, SimulationDriver};

#[derive(Parser, Debug)]
#[command(name = "aetherius")]
#[command(about = "Run an autonomous cognitive agent in a synthetic environment")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many cycles; runs until Ctrl-C when absent
    #[arg(long)]
    cycles: Option<u64>,

    /// Milliseconds between cycles (overrides the config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Cycles between reflections (overrides the config)
    #[arg(long)]
    reflect_every: Option<u64>,

    /// Agent identifier
    #[arg(long, default_value = "AGI-Prototype-1")]
    agent_id: String,

    /// Keep API entries offline instead of attaching HTTP capabilities
    #[arg(long, default_value_t = false)]
    offline: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aetherius=info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AgentConfig::load(path)?,
        None => AgentConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(interval) = args.interval_ms {
        config.cycle_interval_ms = interval;
    }
    if let Some(every) = args.reflect_every {
        config.reflection_interval = every;
    }
    config.validate()?;

    let mut agent = AutonomousAgent::new(args.agent_id.clone(), &config);
    prime_agent(&mut agent);

    println!("Agent ID: {}", agent.id());
    println!("Session: {}", agent.session_id());
    println!("Goals:");
    for goal in agent.goals() {
        println!("  - {} (priority {:.2})", goal.goal, goal.priority);
    }
    println!("Capabilities:");
    for capability in agent.capabilities() {
        println!("  - {}", capability);
    }

    let mut environment = seed_environment();
    if !args.offline {
        attach_http_capabilities(&mut environment, &config)?;
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let mut driver = SimulationDriver::new(agent, environment, &config);
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Could not listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        };
        let traces = driver.run(args.cycles, shutdown).await;
        let kept = traces.len();
        let successes = traces.iter().filter(|t| t.success).count();
        println!(
            "\nRan {} cycles, {} successful actions in the last {}",
            driver.agent().cycles(),
            successes,
            kept
        );
    });

    Ok(())
}
