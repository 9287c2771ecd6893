//! WAcr Config
//!
//! Serializable configuration for the WAcr connector:
//! - [`ConnectorConfig`]: where the API lives and how to reach it
//! - [`Credentials`]: the bearer token attached to every request
//! - [`NodeDef`] / [`TriggerDef`]: what an action node or poll trigger does
//! - [`NodeParameters`]: per-item access to an action node's parameters
//!
//! Definitions are plain JSON so the host can store them however it likes.

mod connector;
mod credentials;
mod enums;
mod error;
mod node;
mod params;
mod trigger;

pub use connector::{ConnectorConfig, DEFAULT_BASE_URL};
pub use credentials::{ApiToken, CREDENTIAL_TEST_PATH, Credentials};
pub use enums::{ContactType, MessageType, TriggerOn};
pub use error::{ConfigError, ParameterError};
pub use node::NodeDef;
pub use params::{DataObject, ItemParameters, NodeParameters};
pub use trigger::{ContactFilters, TriggerDef};
