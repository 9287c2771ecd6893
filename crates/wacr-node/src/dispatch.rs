use std::collections::HashMap;

use futures::future::BoxFuture;

use crate::catalog::Resource;
use crate::{NodeError, OperationContext, OperationOutput, resources};

pub type HandlerResult = Result<OperationOutput, NodeError>;

/// Runs one operation for one input item.
pub type Handler = fn(OperationContext) -> BoxFuture<'static, HandlerResult>;

/// `resource -> operation -> handler` lookup.
#[derive(Default)]
pub struct DispatchTable {
  routes: HashMap<Resource, HashMap<&'static str, Handler>>,
}

impl DispatchTable {
  /// An empty table.
  pub fn new() -> Self {
    Self::default()
  }

  /// The table with every built-in operation registered.
  pub fn standard() -> Self {
    let mut table = Self::new();
    resources::register_all(&mut table);
    table
  }

  pub fn register(&mut self, resource: Resource, operation: &'static str, handler: Handler) {
    self
      .routes
      .entry(resource)
      .or_default()
      .insert(operation, handler);
  }

  pub fn lookup(&self, resource: Resource, operation: &str) -> Option<Handler> {
    self.routes.get(&resource)?.get(operation).copied()
  }

  /// Registered operation names for a resource, sorted.
  pub fn operations(&self, resource: Resource) -> Vec<&'static str> {
    let mut names: Vec<_> = self
      .routes
      .get(&resource)
      .map(|ops| ops.keys().copied().collect())
      .unwrap_or_default();
    names.sort_unstable();
    names
  }
}
