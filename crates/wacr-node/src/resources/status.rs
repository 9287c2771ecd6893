use futures::FutureExt;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::{list, search_query};
use crate::{DispatchTable, HandlerResult, NodeError, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Status, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Status, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Status, "create", |ctx| create(ctx).boxed());
  table.register(Resource::Status, "update", |ctx| update(ctx).boxed());
  table.register(Resource::Status, "delete", |ctx| delete(ctx).boxed());
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let query = search_query(&ctx)?;
  list(&ctx, "/statuses", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let status_id = ctx.path_id("statusId")?;
  let response = ctx
    .request(ApiRequest::get(format!("/statuses/{status_id}")))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn create(ctx: OperationContext) -> HandlerResult {
  let response = ctx
    .request(ApiRequest::post("/statuses").with_body(status_body(&ctx)?))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn update(ctx: OperationContext) -> HandlerResult {
  let status_id = ctx.path_id("statusId")?;
  let response = ctx
    .request(
      ApiRequest::patch(format!("/statuses/{status_id}")).with_body(status_body(&ctx)?),
    )
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn delete(ctx: OperationContext) -> HandlerResult {
  let status_id = ctx.path_id("statusId")?;
  let response = ctx
    .request(ApiRequest::delete(format!("/statuses/{status_id}")))
    .await?;
  Ok(OperationOutput::raw(response))
}

/// `{name}` plus `color` when one is given.
fn status_body(ctx: &OperationContext) -> Result<DataObject, NodeError> {
  let mut body = DataObject::new();
  body.insert("name".to_string(), ctx.string("name")?.into());
  let color = ctx.string_or("color", "")?;
  if !color.is_empty() {
    body.insert("color".to_string(), color.into());
  }
  Ok(body)
}
