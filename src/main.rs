use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use wacr_client::WacrClient;
use wacr_config::{ApiToken, ConfigError, ConnectorConfig, Credentials, NodeDef, TriggerDef};
use wacr_host_http::ReqwestClient;
use wacr_host_kv::FsKvStore;
use wacr_node::{ActionNode, Resource, operations};
use wacr_trigger::{PollScheduler, PollStatus, PollTrigger};

/// WAcr - run WhatsApp CRM operations and poll for new records
#[derive(Parser)]
#[command(name = "wacr")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to the connector config file (JSON)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// WAcr API token
  #[arg(long, global = true, env = "WACR_API_TOKEN", hide_env_values = true)]
  api_token: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Run an action node over the items read from stdin
  Run {
    /// Path to the node definition (JSON)
    node_file: PathBuf,
  },

  /// Poll a trigger once, or repeatedly with --interval-secs
  Poll {
    /// Path to the trigger definition (JSON)
    trigger_file: PathBuf,

    /// Keep polling at this interval until interrupted
    #[arg(long)]
    interval_secs: Option<u64>,
  },

  /// Check that the API token is accepted
  TestCredentials,

  /// List the supported resources and operations
  Operations,
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();

  let command = match cli.command {
    Some(command) => command,
    None => {
      println!("wacr - use --help to see available commands");
      return Ok(());
    }
  };

  if let Commands::Operations = command {
    print_operations();
    return Ok(());
  }

  let config = load_config(cli.config.as_deref())?;
  let credentials = resolve_credentials(cli.api_token, &config)?;

  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async {
    match command {
      Commands::Run { node_file } => run_node(&node_file, &config, credentials).await,
      Commands::Poll {
        trigger_file,
        interval_secs,
      } => poll_trigger(&trigger_file, interval_secs, &config, credentials).await,
      Commands::TestCredentials => test_credentials(&config, credentials).await,
      Commands::Operations => Ok(()),
    }
  })
}

fn load_config(path: Option<&Path>) -> Result<ConnectorConfig> {
  let Some(path) = path else {
    return Ok(ConnectorConfig::default());
  };

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read config file: {}", path.display()))?;
  ConnectorConfig::from_json(&content)
    .with_context(|| format!("failed to parse config file: {}", path.display()))
}

/// Token from the flag or environment first, then the config's token file.
fn resolve_credentials(api_token: Option<String>, config: &ConnectorConfig) -> Result<Credentials> {
  let token = match (api_token, &config.api_token_file) {
    (Some(token), _) => token,
    (None, Some(file)) => std::fs::read_to_string(file)
      .with_context(|| format!("failed to read API token file: {}", file.display()))?,
    (None, None) => return Err(ConfigError::MissingApiToken.into()),
  };

  Ok(Credentials::new(ApiToken::new(token)?))
}

fn client(
  config: &ConnectorConfig,
  credentials: Credentials,
  node_id: &str,
) -> Result<Arc<WacrClient>> {
  let http = ReqwestClient::new(config.timeout(), &config.user_agent)
    .context("failed to create HTTP client")?;
  Ok(Arc::new(WacrClient::new(
    Arc::new(http),
    config,
    credentials,
    node_id,
  )))
}

async fn run_node(
  node_file: &Path,
  config: &ConnectorConfig,
  credentials: Credentials,
) -> Result<()> {
  let content = tokio::fs::read_to_string(node_file)
    .await
    .with_context(|| format!("failed to read node file: {}", node_file.display()))?;
  let def = NodeDef::from_json(&content)
    .with_context(|| format!("failed to parse node file: {}", node_file.display()))?;

  let client = client(config, credentials, &def.node_id)?;
  let node = ActionNode::new(def, client).context("invalid node definition")?;

  let items = read_items_from_stdin()?;
  eprintln!("Running node {} over {} item(s)", node.node_id(), items.len());

  let output = node.execute(items).await.context("node execution failed")?;
  println!("{}", serde_json::to_string_pretty(&output)?);

  Ok(())
}

async fn poll_trigger(
  trigger_file: &Path,
  interval_secs: Option<u64>,
  config: &ConnectorConfig,
  credentials: Credentials,
) -> Result<()> {
  let content = tokio::fs::read_to_string(trigger_file)
    .await
    .with_context(|| format!("failed to read trigger file: {}", trigger_file.display()))?;
  let def = TriggerDef::from_json(&content)
    .with_context(|| format!("failed to parse trigger file: {}", trigger_file.display()))?;

  let state_dir = match &config.state_dir {
    Some(dir) => dir.clone(),
    None => dirs::home_dir()
      .context("could not determine home directory")?
      .join(".wacr")
      .join("state"),
  };
  let store = FsKvStore::new(&state_dir, &def.node_id);

  let client = client(config, credentials, &def.node_id)?;
  let trigger = Arc::new(PollTrigger::new(def, client, Arc::new(store)));

  let Some(interval_secs) = interval_secs else {
    return match trigger.poll().await.context("poll failed")? {
      PollStatus::Emitted(records) => {
        println!("{}", serde_json::to_string_pretty(&records)?);
        Ok(())
      }
      PollStatus::Pending | PollStatus::Skipped => {
        eprintln!("No new records");
        Ok(())
      }
    };
  };

  let (sender, mut receiver) = mpsc::channel(16);
  let cancel = CancellationToken::new();
  let scheduler = PollScheduler::new(trigger, Duration::from_secs(interval_secs), sender);
  let handle = tokio::spawn(scheduler.run(cancel.clone()));

  loop {
    tokio::select! {
      _ = tokio::signal::ctrl_c() => {
        eprintln!("Stopping");
        cancel.cancel();
        break;
      }
      batch = receiver.recv() => match batch {
        Some(records) => println!("{}", serde_json::to_string(&records)?),
        None => break,
      }
    }
  }

  handle.await.context("poll scheduler task failed")?;
  Ok(())
}

async fn test_credentials(config: &ConnectorConfig, credentials: Credentials) -> Result<()> {
  let client = client(config, credentials, "credentials-test")?;
  let account = client
    .test_credentials()
    .await
    .context("credential test failed")?;

  eprintln!("Credentials OK");
  println!("{}", serde_json::to_string_pretty(&account)?);
  Ok(())
}

fn print_operations() {
  for resource in Resource::ALL {
    println!("{} ({})", resource.display_name(), resource);
    for info in operations().iter().filter(|info| info.resource == resource) {
      println!("  {:<16} {:<20} {}", info.operation, info.name, info.description);
    }
  }
}

/// Input items: a JSON array, a single object, or nothing (one empty item).
fn read_items_from_stdin() -> Result<Vec<Value>> {
  use std::io::IsTerminal;

  if io::stdin().is_terminal() {
    return Ok(vec![serde_json::json!({})]);
  }

  let mut input = String::new();
  io::stdin()
    .read_to_string(&mut input)
    .context("failed to read items from stdin")?;

  if input.trim().is_empty() {
    return Ok(vec![serde_json::json!({})]);
  }

  match serde_json::from_str(&input).context("failed to parse items JSON from stdin")? {
    Value::Array(items) => Ok(items),
    item => Ok(vec![item]),
  }
}
