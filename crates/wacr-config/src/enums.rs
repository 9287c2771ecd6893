use std::fmt;

use serde::{Deserialize, Serialize};

/// Which kind of record starts a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerOn {
  NewContact,
  NewInboundMessage,
  NewOutboundMessage,
  /// Any new message, inbound or outbound.
  NewMessage,
}

impl TriggerOn {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::NewContact => "newContact",
      Self::NewInboundMessage => "newInboundMessage",
      Self::NewOutboundMessage => "newOutboundMessage",
      Self::NewMessage => "newMessage",
    }
  }

  /// Message direction filter, if this kind has one.
  pub fn direction(&self) -> Option<&'static str> {
    match self {
      Self::NewInboundMessage => Some("inbound"),
      Self::NewOutboundMessage => Some("outbound"),
      Self::NewContact | Self::NewMessage => None,
    }
  }
}

impl fmt::Display for TriggerOn {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactType {
  Lead,
  Customer,
  Guest,
}

impl ContactType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Lead => "lead",
      Self::Customer => "customer",
      Self::Guest => "guest",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
  Text,
  Template,
  Image,
  Video,
  Document,
  Audio,
  Interactive,
}

impl MessageType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Text => "text",
      Self::Template => "template",
      Self::Image => "image",
      Self::Video => "video",
      Self::Document => "document",
      Self::Audio => "audio",
      Self::Interactive => "interactive",
    }
  }
}
