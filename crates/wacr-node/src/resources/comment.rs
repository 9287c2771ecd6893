use futures::FutureExt;
use wacr_client::{ApiRequest, PageEnvelope};
use wacr_config::DataObject;

use crate::transform::merge;
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Comment, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Comment, "add", |ctx| add(ctx).boxed());
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let mobile = ctx.path_id("mobile")?;
  let response = ctx
    .request(ApiRequest::get(format!("/comments/{mobile}")))
    .await?;
  Ok(OperationOutput::Many(
    PageEnvelope::from_response(response).into_items(),
  ))
}

async fn add(ctx: OperationContext) -> HandlerResult {
  let mobile = ctx.path_id("mobile")?;
  let mut body = DataObject::new();
  body.insert("comment".to_string(), ctx.string("comment")?.into());
  merge(&mut body, ctx.object("additionalFields")?);

  let response = ctx
    .request(ApiRequest::post(format!("/comments/{mobile}")).with_body(body))
    .await?;
  Ok(OperationOutput::raw(response))
}
