use futures::FutureExt;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::{list, search_query};
use crate::transform::merge;
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

const DEFAULT_PURPOSE: &str = "authentication";

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Otp, "send", |ctx| send(ctx).boxed());
  table.register(Resource::Otp, "verify", |ctx| verify(ctx).boxed());
  table.register(Resource::Otp, "resend", |ctx| resend(ctx).boxed());
  table.register(Resource::Otp, "status", |ctx| status(ctx).boxed());
  table.register(Resource::Otp, "listTemplates", |ctx| list_templates(ctx).boxed());
}

async fn send(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("template_name".to_string(), ctx.string("template_name")?.into());
  body.insert("code".to_string(), ctx.string("code")?.into());
  merge(&mut body, ctx.object("additionalFields")?);

  post(&ctx, "/auth/send-otp", body).await
}

async fn verify(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("code".to_string(), ctx.string("code")?.into());
  body.insert(
    "purpose".to_string(),
    ctx.string_or("purpose", DEFAULT_PURPOSE)?.into(),
  );

  post(&ctx, "/auth/verify", body).await
}

async fn resend(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert("template_name".to_string(), ctx.string("template_name")?.into());
  merge(&mut body, ctx.object("additionalFields")?);

  post(&ctx, "/auth/resend", body).await
}

async fn status(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("phone".to_string(), ctx.string("phone")?.into());
  body.insert(
    "purpose".to_string(),
    ctx.string_or("purpose", DEFAULT_PURPOSE)?.into(),
  );

  post(&ctx, "/auth/status", body).await
}

async fn list_templates(ctx: OperationContext) -> HandlerResult {
  let query = search_query(&ctx)?;
  list(&ctx, "/auth/templates", query).await
}

async fn post(ctx: &OperationContext, path: &str, body: DataObject) -> HandlerResult {
  let response = ctx
    .request(ApiRequest::post(path).with_body(body))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}
