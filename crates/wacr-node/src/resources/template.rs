use futures::FutureExt;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::list;
use crate::transform::{copy_filters, copy_if_set};
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Template, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Template, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Template, "sync", |ctx| sync(ctx).boxed());
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let filters = ctx.object("filters")?;
  let mut query = DataObject::new();
  copy_if_set(&filters, "search", &mut query, "search");
  copy_filters(&filters, &["status", "category", "language"], &mut query);

  list(&ctx, "/templates", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let template_id = ctx.path_id("templateId")?;
  let response = ctx
    .request(ApiRequest::get(format!("/templates/{template_id}")))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn sync(ctx: OperationContext) -> HandlerResult {
  let response = ctx.request(ApiRequest::post("/templates/sync")).await?;
  Ok(OperationOutput::unwrap_data(response))
}
