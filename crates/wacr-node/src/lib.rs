//! WAcr Node
//!
//! The action node: for every input item, run one (resource, operation)
//! against the WAcr API and collect the results.
//!
//! Operations are looked up in a [`DispatchTable`] keyed by [`Resource`] and
//! operation name. Each handler reads its parameters for the current item,
//! validates them locally, and issues the API call through
//! [`WacrClient`](wacr_client::WacrClient).

mod catalog;
mod context;
mod dispatch;
mod error;
mod node;
mod output;
mod resources;
mod transform;

pub use catalog::{OperationInfo, Resource, operations};
pub use context::OperationContext;
pub use dispatch::{DispatchTable, Handler, HandlerResult};
pub use error::NodeError;
pub use node::ActionNode;
pub use output::{OperationOutput, OutputItem};
