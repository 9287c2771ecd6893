use futures::FutureExt;
use serde_json::Value;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::list;
use crate::transform::{copy_filters, copy_if_set, is_set, join_list, merge};
use crate::{DispatchTable, HandlerResult, NodeError, OperationContext, OperationOutput, Resource};

const FILTER_FIELDS: &[&str] = &["type", "status_id", "source_id", "group_id", "assigned_id"];

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Contact, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Contact, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Contact, "create", |ctx| create(ctx).boxed());
  table.register(Resource::Contact, "update", |ctx| update(ctx).boxed());
  table.register(Resource::Contact, "delete", |ctx| delete(ctx).boxed());
  table.register(Resource::Contact, "batchCreate", |ctx| batch_create(ctx).boxed());
  table.register(Resource::Contact, "batchDelete", |ctx| batch_delete(ctx).boxed());
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let filters = ctx.object("filters")?;
  let mut query = DataObject::new();

  copy_if_set(&filters, "search", &mut query, "search");
  copy_if_set(&filters, "sort", &mut query, "sort");
  if let Some(include) = filters.get("include").and_then(join_list) {
    query.insert("include".to_string(), include.into());
  }
  copy_filters(&filters, FILTER_FIELDS, &mut query);

  list(&ctx, "/contacts", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let contact_id = ctx.path_id("contactId")?;
  let include = ctx.string_list("include")?;

  let mut query = DataObject::new();
  if !include.is_empty() {
    query.insert("include".to_string(), include.join(",").into());
  }

  let response = ctx
    .request(ApiRequest::get(format!("/contacts/{contact_id}")).with_query(query))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn create(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("firstname".to_string(), ctx.string("firstname")?.into());
  body.insert("lastname".to_string(), ctx.string("lastname")?.into());
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("type".to_string(), ctx.string("type")?.into());
  body.insert("source_id".to_string(), ctx.integer("source_id")?.into());
  body.insert("status_id".to_string(), ctx.integer("status_id")?.into());

  let mut additional = ctx.object("additionalFields")?;
  parse_groups(&ctx, &mut additional)?;
  merge(&mut body, additional);

  let response = ctx
    .request(ApiRequest::post("/contacts").with_body(body))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn update(ctx: OperationContext) -> HandlerResult {
  let contact_id = ctx.path_id("contactId")?;
  let mut fields = ctx.object("updateFields")?;
  parse_groups(&ctx, &mut fields)?;

  let response = ctx
    .request(ApiRequest::patch(format!("/contacts/{contact_id}")).with_body(fields))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn delete(ctx: OperationContext) -> HandlerResult {
  let contact_id = ctx.path_id("contactId")?;
  let response = ctx
    .request(ApiRequest::delete(format!("/contacts/{contact_id}")))
    .await?;
  Ok(OperationOutput::raw(response))
}

async fn batch_create(ctx: OperationContext) -> HandlerResult {
  let contacts = ctx.json_array("contacts", "Contacts")?;
  let options = ctx.object("batchOptions")?;

  let mut body = DataObject::new();
  body.insert("contacts".to_string(), Value::Array(contacts));
  if !options.is_empty() {
    body.insert("options".to_string(), Value::Object(options));
  }

  let response = ctx
    .request(ApiRequest::post("/contacts/batch").with_body(body))
    .await?;
  Ok(OperationOutput::raw(response))
}

async fn batch_delete(ctx: OperationContext) -> HandlerResult {
  let ids = ctx.id_list("ids", "Contact IDs")?;

  let mut body = DataObject::new();
  body.insert("ids".to_string(), ids.into());

  let response = ctx
    .request(ApiRequest::delete("/contacts/batch").with_body(body))
    .await?;
  Ok(OperationOutput::raw(response))
}

/// `groups` arrives as CSV text and is sent as a list of ids.
fn parse_groups(ctx: &OperationContext, fields: &mut DataObject) -> Result<(), NodeError> {
  let Some(groups) = fields.get("groups").filter(|groups| is_set(groups)) else {
    return Ok(());
  };
  let ids = ctx.parse_ids(groups, "Groups")?;
  fields.insert("groups".to_string(), ids.into());
  Ok(())
}
