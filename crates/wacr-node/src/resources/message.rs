use futures::FutureExt;
use serde_json::Value;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::list;
use crate::transform::{copy_filters, copy_if_set, merge};
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

const FILTER_FIELDS: &[&str] = &["type", "status", "direction", "interaction_id"];

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Message, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Message, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Message, "sendText", |ctx| send_text(ctx).boxed());
  table.register(Resource::Message, "sendTemplate", |ctx| {
    send_template(ctx).boxed()
  });
  table.register(Resource::Message, "sendMedia", |ctx| send_media(ctx).boxed());
  table.register(Resource::Message, "sendInteractive", |ctx| {
    send_interactive(ctx).boxed()
  });
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let filters = ctx.object("filters")?;
  let mut query = DataObject::new();
  query.insert("sort".to_string(), "-created_at".into());
  copy_if_set(&filters, "search", &mut query, "search");
  copy_filters(&filters, FILTER_FIELDS, &mut query);

  list(&ctx, "/messages", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let message_id = ctx.path_id("messageId")?;
  let response = ctx
    .request(ApiRequest::get(format!("/messages/{message_id}")))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn send_text(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("message".to_string(), ctx.string("message")?.into());

  let additional = ctx.object("additionalFields")?;
  copy_if_set(&additional, "contact_id", &mut body, "contact_id");

  send(&ctx, "/messages/text", body).await
}

async fn send_template(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("template_name".to_string(), ctx.string("template_name")?.into());
  body.insert("language".to_string(), ctx.string("language")?.into());
  merge(&mut body, ctx.object("templateParams")?);

  send(&ctx, "/messages/template", body).await
}

async fn send_media(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("media_type".to_string(), ctx.string("media_type")?.into());
  body.insert("media_url".to_string(), ctx.string("media_url")?.into());
  merge(&mut body, ctx.object("additionalFields")?);

  send(&ctx, "/messages/media", body).await
}

async fn send_interactive(ctx: OperationContext) -> HandlerResult {
  let kind = ctx.string("interactiveType")?;

  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("type".to_string(), kind.clone().into());
  body.insert("body_text".to_string(), ctx.string("body_text")?.into());
  merge(&mut body, ctx.object("additionalFields")?);

  match kind.as_str() {
    "button" => {
      let buttons = ctx.json_array("buttons", "Buttons")?;
      body.insert("buttons".to_string(), Value::Array(buttons));
    }
    "list" => {
      body.insert(
        "list_button_text".to_string(),
        ctx.string("list_button_text")?.into(),
      );
      let sections = ctx.json_array("sections", "Sections")?;
      body.insert("sections".to_string(), Value::Array(sections));
    }
    _ => {}
  }

  send(&ctx, "/messages/interactive", body).await
}

async fn send(ctx: &OperationContext, path: &str, body: DataObject) -> HandlerResult {
  let response = ctx
    .request(ApiRequest::post(path).with_body(body))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}
