//! Operation handlers, one module per resource.

mod account;
mod comment;
mod contact;
mod group;
mod message;
mod otp;
mod source;
mod status;
mod template;

use wacr_client::{ApiRequest, PageEnvelope};
use wacr_config::DataObject;

use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput};

pub(crate) fn register_all(table: &mut DispatchTable) {
  account::register(table);
  comment::register(table);
  contact::register(table);
  group::register(table);
  message::register(table);
  otp::register(table);
  source::register(table);
  status::register(table);
  template::register(table);
}

/// Default page size when `returnAll` is off.
const DEFAULT_LIMIT: i64 = 50;

/// Listing with `returnAll`/`limit`: walk every page, or fetch one page of
/// `limit` records.
async fn list(ctx: &OperationContext, path: &str, mut query: DataObject) -> HandlerResult {
  if ctx.boolean_or("returnAll", false)? {
    let items = ctx
      .request_all_items(ApiRequest::get(path).with_query(query))
      .await?;
    return Ok(OperationOutput::Many(items));
  }

  let limit = ctx.integer_or("limit", DEFAULT_LIMIT)?;
  query.insert("per_page".to_string(), limit.into());
  let response = ctx
    .request(ApiRequest::get(path).with_query(query))
    .await?;
  Ok(OperationOutput::Many(
    PageEnvelope::from_response(response).into_items(),
  ))
}

/// `{search}` when the `search` parameter is non-empty.
fn search_query(ctx: &OperationContext) -> Result<DataObject, crate::NodeError> {
  let mut query = DataObject::new();
  let search = ctx.string_or("search", "")?;
  if !search.is_empty() {
    query.insert("search".to_string(), search.into());
  }
  Ok(query)
}
