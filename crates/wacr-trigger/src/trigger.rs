use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};
use wacr_client::{ApiRequest, PageEnvelope, WacrClient};
use wacr_config::{DataObject, TriggerDef, TriggerOn};
use wacr_host_kv::KvStore;

use crate::cursor::CursorStore;
use crate::error::TriggerError;

/// Records fetched per tick. Only the first page is read.
pub const POLL_PAGE_SIZE: u64 = 100;

/// Outcome of one poll tick.
#[derive(Debug, Clone, PartialEq)]
pub enum PollStatus {
  /// Nothing new since the previous tick.
  Pending,
  /// New records, newest first.
  Emitted(Vec<Value>),
  /// A tick was already fetching; this one did nothing.
  Skipped,
}

/// Incremental poll over new contacts or messages.
pub struct PollTrigger {
  def: TriggerDef,
  client: Arc<WacrClient>,
  cursors: CursorStore,
  fetching: AtomicBool,
}

/// Clears the fetching flag when the tick ends, whichever way it ends.
struct FetchGuard<'a>(&'a AtomicBool);

impl Drop for FetchGuard<'_> {
  fn drop(&mut self) {
    self.0.store(false, Ordering::Release);
  }
}

impl PollTrigger {
  pub fn new(def: TriggerDef, client: Arc<WacrClient>, store: Arc<dyn KvStore>) -> Self {
    Self {
      def,
      client,
      cursors: CursorStore::new(store),
      fetching: AtomicBool::new(false),
    }
  }

  pub fn def(&self) -> &TriggerDef {
    &self.def
  }

  /// Whether a tick is in flight.
  pub fn is_fetching(&self) -> bool {
    self.fetching.load(Ordering::Acquire)
  }

  /// Run one tick now.
  pub async fn poll(&self) -> Result<PollStatus, TriggerError> {
    self.poll_at(Utc::now()).await
  }

  /// Run one tick as if the current time were `now`.
  #[instrument(
    name = "trigger_poll",
    skip(self),
    fields(node_id = %self.def.node_id, trigger_on = %self.def.trigger_on)
  )]
  pub async fn poll_at(&self, now: DateTime<Utc>) -> Result<PollStatus, TriggerError> {
    if self
      .fetching
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .is_err()
    {
      warn!("previous poll still in progress, skipping");
      return Ok(PollStatus::Skipped);
    }
    let _guard = FetchGuard(&self.fetching);

    let trigger_on = self.def.trigger_on;
    let cursor = self.cursors.read(trigger_on, now).await?;
    debug!(cursor = %cursor, "polling");

    let fetched = self.client.request(self.request(&cursor)).await;

    // The cursor moves even when the fetch failed.
    let stored = self
      .cursors
      .write(trigger_on, now)
      .await
      .inspect_err(|e| warn!(error = %e, "failed to store poll cursor"));
    let response = fetched.inspect_err(|e| error!(error = %e, "poll failed"))?;
    stored?;

    let records = PageEnvelope::from_response(response).into_items();
    if records.is_empty() {
      debug!("no new records");
      return Ok(PollStatus::Pending);
    }

    info!(records = records.len(), "new records");
    Ok(PollStatus::Emitted(records))
  }

  fn request(&self, cursor: &str) -> ApiRequest {
    let mut query = DataObject::new();
    query.insert("sort".to_string(), "-created_at".into());
    query.insert("per_page".to_string(), POLL_PAGE_SIZE.into());
    query.insert("filter[created_at][gte]".to_string(), cursor.into());

    match self.def.trigger_on {
      TriggerOn::NewContact => {
        let filters = &self.def.contact_filters;
        if let Some(contact_type) = filters.contact_type {
          query.insert("filter[type]".to_string(), contact_type.as_str().into());
        }
        if filters.source_id != 0 {
          query.insert("filter[source_id]".to_string(), filters.source_id.into());
        }
        ApiRequest::get("/contacts").with_query(query)
      }
      kind => {
        if let Some(direction) = kind.direction() {
          query.insert("filter[direction]".to_string(), direction.into());
        }
        if let Some(message_type) = self.def.message_type_filter {
          query.insert("filter[type]".to_string(), message_type.as_str().into());
        }
        ApiRequest::get("/messages").with_query(query)
      }
    }
  }
}
