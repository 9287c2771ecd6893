use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument, warn};
use wacr_client::WacrClient;
use wacr_config::{NodeDef, NodeParameters};

use crate::{DispatchTable, Handler, NodeError, OperationContext, OutputItem, Resource};

/// A configured action node, ready to run over a batch of input items.
///
/// Resource and operation are resolved once when the node is built; the
/// parameters are read again for every item.
pub struct ActionNode {
  node_id: String,
  resource: Resource,
  operation: String,
  continue_on_fail: bool,
  handler: Handler,
  params: Arc<NodeParameters>,
  client: Arc<WacrClient>,
}

impl ActionNode {
  /// Build a node using the built-in operations.
  pub fn new(def: NodeDef, client: Arc<WacrClient>) -> Result<Self, NodeError> {
    Self::with_table(def, client, &DispatchTable::standard())
  }

  pub fn with_table(
    def: NodeDef,
    client: Arc<WacrClient>,
    table: &DispatchTable,
  ) -> Result<Self, NodeError> {
    let unsupported = || NodeError::UnsupportedOperation {
      resource: def.resource.clone(),
      operation: def.operation.clone(),
    };

    let resource: Resource = def.resource.parse().map_err(|_| unsupported())?;
    let handler = table
      .lookup(resource, &def.operation)
      .ok_or_else(unsupported)?;

    Ok(Self {
      node_id: def.node_id,
      resource,
      operation: def.operation,
      continue_on_fail: def.continue_on_fail,
      handler,
      params: Arc::new(NodeParameters::new(def.parameters)),
      client,
    })
  }

  pub fn node_id(&self) -> &str {
    &self.node_id
  }

  /// Run the operation for every item, in order.
  ///
  /// The first failure aborts the batch unless the node continues on
  /// failure, in which case the failed item is passed through with its
  /// error attached.
  #[instrument(
    name = "node_execute",
    skip(self, items),
    fields(
      node_id = %self.node_id,
      resource = %self.resource,
      operation = %self.operation,
      items = items.len(),
    )
  )]
  pub async fn execute(&self, items: Vec<Value>) -> Result<Vec<OutputItem>, NodeError> {
    info!("starting node execution");

    let mut output = Vec::with_capacity(items.len());
    for (item_index, item) in items.into_iter().enumerate() {
      let params = self.params.for_item(item_index, item.clone());
      let ctx = OperationContext::new(self.client.clone(), params);

      match (self.handler)(ctx).await {
        Ok(result) => output.extend(result.into_output_items(item_index)),
        Err(e) if self.continue_on_fail => {
          warn!(item_index, error = %e, "item failed, continuing");
          output.push(OutputItem::failed(item, item_index, &e));
        }
        Err(e) => {
          error!(item_index, error = %e, "node execution failed");
          return Err(e);
        }
      }
    }

    info!(records = output.len(), "node execution completed");
    Ok(output)
  }
}
