use futures::FutureExt;
use wacr_client::ApiRequest;

use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Account, "get", |ctx| fetch(ctx, "/account").boxed());
  table.register(Resource::Account, "getUsage", |ctx| {
    fetch(ctx, "/account/usage").boxed()
  });
  table.register(Resource::Account, "getLimits", |ctx| {
    fetch(ctx, "/account/limits").boxed()
  });
}

async fn fetch(ctx: OperationContext, path: &'static str) -> HandlerResult {
  let response = ctx.request(ApiRequest::get(path)).await?;
  Ok(OperationOutput::raw(response))
}
