//! Names, display names and descriptions of every supported operation.

use std::fmt;
use std::str::FromStr;

/// An API resource the node can operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
  Account,
  Comment,
  Contact,
  Group,
  Message,
  Otp,
  Source,
  Status,
  Template,
}

impl Resource {
  pub const ALL: [Resource; 9] = [
    Resource::Account,
    Resource::Comment,
    Resource::Contact,
    Resource::Group,
    Resource::Message,
    Resource::Otp,
    Resource::Source,
    Resource::Status,
    Resource::Template,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Account => "account",
      Self::Comment => "comment",
      Self::Contact => "contact",
      Self::Group => "group",
      Self::Message => "message",
      Self::Otp => "otp",
      Self::Source => "source",
      Self::Status => "status",
      Self::Template => "template",
    }
  }

  pub fn display_name(&self) -> &'static str {
    match self {
      Self::Account => "Account",
      Self::Comment => "Comment",
      Self::Contact => "Contact",
      Self::Group => "Group",
      Self::Message => "Message",
      Self::Otp => "OTP / Authentication",
      Self::Source => "Source",
      Self::Status => "Status",
      Self::Template => "Template",
    }
  }
}

impl fmt::Display for Resource {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Resource {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Resource::ALL
      .into_iter()
      .find(|resource| resource.as_str() == s)
      .ok_or_else(|| format!("unknown resource '{s}'"))
  }
}

/// Describes one operation for listings and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
  pub resource: Resource,
  pub operation: &'static str,
  pub name: &'static str,
  pub description: &'static str,
}

const fn op(
  resource: Resource,
  operation: &'static str,
  name: &'static str,
  description: &'static str,
) -> OperationInfo {
  OperationInfo {
    resource,
    operation,
    name,
    description,
  }
}

const OPERATIONS: &[OperationInfo] = &[
  op(Resource::Account, "get", "Get Info", "Get account information and subscription details"),
  op(Resource::Account, "getUsage", "Get Usage", "Get current feature usage statistics"),
  op(Resource::Account, "getLimits", "Get Plan Limits", "Get subscription plan feature limits and access flags"),
  op(Resource::Comment, "getAll", "Get Many", "Get all internal notes for a contact"),
  op(Resource::Comment, "add", "Add", "Add an internal note to a contact"),
  op(Resource::Contact, "getAll", "Get Many", "Get many contacts"),
  op(Resource::Contact, "get", "Get", "Get a contact"),
  op(Resource::Contact, "create", "Create", "Create a contact"),
  op(Resource::Contact, "update", "Update", "Update a contact"),
  op(Resource::Contact, "delete", "Delete", "Delete a contact"),
  op(Resource::Contact, "batchCreate", "Batch Create", "Create many contacts at once"),
  op(Resource::Contact, "batchDelete", "Batch Delete", "Delete many contacts at once"),
  op(Resource::Group, "getAll", "Get Many", "Retrieve a list of groups"),
  op(Resource::Group, "get", "Get", "Get a group by ID"),
  op(Resource::Group, "create", "Create", "Create a new group"),
  op(Resource::Group, "update", "Update", "Update a group name"),
  op(Resource::Group, "delete", "Delete", "Delete a group"),
  op(Resource::Group, "addContacts", "Add Contacts", "Add contacts to a group"),
  op(Resource::Group, "removeContacts", "Remove Contacts", "Remove contacts from a group"),
  op(Resource::Message, "getAll", "Get Many", "Get many messages"),
  op(Resource::Message, "get", "Get", "Get a message"),
  op(Resource::Message, "sendText", "Send Text", "Send a text message"),
  op(Resource::Message, "sendTemplate", "Send Template", "Send a template message"),
  op(Resource::Message, "sendMedia", "Send Media", "Send an image, video, document or audio message"),
  op(Resource::Message, "sendInteractive", "Send Interactive", "Send a button or list message"),
  op(Resource::Otp, "send", "Send OTP", "Send an OTP code via WhatsApp authentication template"),
  op(Resource::Otp, "verify", "Verify OTP", "Verify an OTP code"),
  op(Resource::Otp, "resend", "Resend OTP", "Resend a new OTP code (invalidates previous code)"),
  op(Resource::Otp, "status", "Check Status", "Check the status and expiry of an active OTP (non-destructive)"),
  op(Resource::Otp, "listTemplates", "List Auth Templates", "List available AUTHENTICATION category templates"),
  op(Resource::Source, "getAll", "Get Many", "Retrieve a list of sources"),
  op(Resource::Source, "get", "Get", "Get a source by ID"),
  op(Resource::Source, "create", "Create", "Create a new source"),
  op(Resource::Source, "update", "Update", "Update a source name"),
  op(Resource::Source, "delete", "Delete", "Delete a source"),
  op(Resource::Status, "getAll", "Get Many", "Get many statuses"),
  op(Resource::Status, "get", "Get", "Get a status"),
  op(Resource::Status, "create", "Create", "Create a status"),
  op(Resource::Status, "update", "Update", "Update a status"),
  op(Resource::Status, "delete", "Delete", "Delete a status"),
  op(Resource::Template, "getAll", "Get Many", "Retrieve a list of templates"),
  op(Resource::Template, "get", "Get", "Get a template by WhatsApp template ID"),
  op(Resource::Template, "sync", "Sync", "Sync templates from WhatsApp Business API"),
];

/// Every supported operation, grouped by resource.
pub fn operations() -> &'static [OperationInfo] {
  OPERATIONS
}
