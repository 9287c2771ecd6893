use futures::FutureExt;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::{list, search_query};
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Source, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Source, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Source, "create", |ctx| create(ctx).boxed());
  table.register(Resource::Source, "update", |ctx| update(ctx).boxed());
  table.register(Resource::Source, "delete", |ctx| delete(ctx).boxed());
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let query = search_query(&ctx)?;
  list(&ctx, "/sources", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let source_id = ctx.path_id("sourceId")?;
  let response = ctx
    .request(ApiRequest::get(format!("/sources/{source_id}")))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn create(ctx: OperationContext) -> HandlerResult {
  let mut body = DataObject::new();
  body.insert("name".to_string(), ctx.string("name")?.into());

  let response = ctx
    .request(ApiRequest::post("/sources").with_body(body))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn update(ctx: OperationContext) -> HandlerResult {
  let source_id = ctx.path_id("sourceId")?;
  let mut body = DataObject::new();
  body.insert("name".to_string(), ctx.string("name")?.into());

  let response = ctx
    .request(ApiRequest::patch(format!("/sources/{source_id}")).with_body(body))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn delete(ctx: OperationContext) -> HandlerResult {
  let source_id = ctx.path_id("sourceId")?;
  let response = ctx
    .request(ApiRequest::delete(format!("/sources/{source_id}")))
    .await?;
  Ok(OperationOutput::raw(response))
}
