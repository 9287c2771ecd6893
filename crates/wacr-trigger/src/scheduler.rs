use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::trigger::{PollStatus, PollTrigger};

/// Runs a trigger at a fixed interval until cancelled.
///
/// Each emitted batch is sent on the channel. A failing tick is logged and
/// the loop carries on with the next one.
pub struct PollScheduler {
  trigger: Arc<PollTrigger>,
  interval: Duration,
  sender: mpsc::Sender<Vec<Value>>,
}

impl PollScheduler {
  pub fn new(
    trigger: Arc<PollTrigger>,
    interval: Duration,
    sender: mpsc::Sender<Vec<Value>>,
  ) -> Self {
    Self {
      trigger,
      interval,
      sender,
    }
  }

  /// Start the poll loop. The first tick runs immediately.
  ///
  /// Returns when the token is cancelled or the receiver is dropped.
  pub async fn run(self, cancel: CancellationToken) {
    let node_id = self.trigger.def().node_id.clone();
    info!(
      node_id = %node_id,
      interval = ?self.interval,
      "starting poll scheduler"
    );

    let mut ticker = tokio::time::interval(self.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
      tokio::select! {
        _ = cancel.cancelled() => {
          info!(node_id = %node_id, "poll scheduler cancelled");
          break;
        }
        _ = ticker.tick() => {
          match self.trigger.poll().await {
            Ok(PollStatus::Emitted(records)) => {
              if self.sender.send(records).await.is_err() {
                info!(node_id = %node_id, "receiver dropped, stopping poll scheduler");
                break;
              }
            }
            Ok(PollStatus::Pending | PollStatus::Skipped) => {}
            Err(e) => {
              error!(node_id = %node_id, error = %e, "poll tick failed");
            }
          }
        }
      }
    }
  }
}
