use futures::FutureExt;
use wacr_client::ApiRequest;
use wacr_config::DataObject;

use super::list;
use crate::transform::copy_if_set;
use crate::{DispatchTable, HandlerResult, OperationContext, OperationOutput, Resource};

pub(super) fn register(table: &mut DispatchTable) {
  table.register(Resource::Group, "getAll", |ctx| get_all(ctx).boxed());
  table.register(Resource::Group, "get", |ctx| get(ctx).boxed());
  table.register(Resource::Group, "create", |ctx| create(ctx).boxed());
  table.register(Resource::Group, "update", |ctx| update(ctx).boxed());
  table.register(Resource::Group, "delete", |ctx| delete(ctx).boxed());
  table.register(Resource::Group, "addContacts", |ctx| add_contacts(ctx).boxed());
  table.register(Resource::Group, "removeContacts", |ctx| {
    remove_contacts(ctx).boxed()
  });
}

async fn get_all(ctx: OperationContext) -> HandlerResult {
  let filters = ctx.object("filters")?;
  let mut query = DataObject::new();
  copy_if_set(&filters, "search", &mut query, "search");
  copy_if_set(&filters, "sort", &mut query, "sort");

  list(&ctx, "/groups", query).await
}

async fn get(ctx: OperationContext) -> HandlerResult {
  let group_id = ctx.path_id("groupId")?;
  let response = ctx
    .request(ApiRequest::get(format!("/groups/{group_id}")))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn create(ctx: OperationContext) -> HandlerResult {
  let response = ctx
    .request(ApiRequest::post("/groups").with_body(name_body(&ctx)?))
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn update(ctx: OperationContext) -> HandlerResult {
  let group_id = ctx.path_id("groupId")?;
  let response = ctx
    .request(
      ApiRequest::patch(format!("/groups/{group_id}")).with_body(name_body(&ctx)?),
    )
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn delete(ctx: OperationContext) -> HandlerResult {
  let group_id = ctx.path_id("groupId")?;
  let response = ctx
    .request(ApiRequest::delete(format!("/groups/{group_id}")))
    .await?;
  Ok(OperationOutput::raw(response))
}

async fn add_contacts(ctx: OperationContext) -> HandlerResult {
  let group_id = ctx.path_id("groupId")?;
  let response = ctx
    .request(
      ApiRequest::post(format!("/groups/{group_id}/contacts"))
        .with_body(members_body(&ctx)?),
    )
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

async fn remove_contacts(ctx: OperationContext) -> HandlerResult {
  let group_id = ctx.path_id("groupId")?;
  let response = ctx
    .request(
      ApiRequest::delete(format!("/groups/{group_id}/contacts"))
        .with_body(members_body(&ctx)?),
    )
    .await?;
  Ok(OperationOutput::unwrap_data(response))
}

fn name_body(ctx: &OperationContext) -> Result<DataObject, crate::NodeError> {
  let mut body = DataObject::new();
  body.insert("name".to_string(), ctx.string("name")?.into());
  Ok(body)
}

fn members_body(ctx: &OperationContext) -> Result<DataObject, crate::NodeError> {
  let mut body = DataObject::new();
  body.insert(
    "contact_ids".to_string(),
    ctx.id_list("contact_ids", "Contact IDs")?.into(),
  );
  Ok(body)
}
