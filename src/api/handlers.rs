use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::resources::{
    CreateResourceRequest, MessageResponse, Page, ResourceResponse, ResourceStatus,
    ResourceStore, ResourceType, UpdateResourceRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PageParams {
    pub page: u32,
    pub size: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusParams {
    pub status: ResourceStatus,
}

pub async fn create_resource<S: ResourceStore>(
    State(state): State<AppState<S>>,
    payload: Result<Json<CreateResourceRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ResourceResponse>)> {
    let Json(request) = payload?;
    let resource = state.service.create_resource(request).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

pub async fn get_resource<S: ResourceStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<ResourceResponse>> {
    let Path(id) = id?;
    state
        .service
        .get_resource_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn list_resources<S: ResourceStore>(
    State(state): State<AppState<S>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Page<ResourceResponse>>> {
    let Query(params) = params?;
    let page = state
        .service
        .get_all_resources(params.page, params.size)
        .await?;
    Ok(Json(page))
}

pub async fn list_resources_by_type<S: ResourceStore>(
    State(state): State<AppState<S>>,
    resource_type: Result<Path<ResourceType>, PathRejection>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Page<ResourceResponse>>> {
    let Path(resource_type) = resource_type?;
    let Query(params) = params?;
    let page = state
        .service
        .get_resources_by_type(resource_type, params.page, params.size)
        .await?;
    Ok(Json(page))
}

pub async fn list_available_resources<S: ResourceStore>(
    State(state): State<AppState<S>>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> ApiResult<Json<Page<ResourceResponse>>> {
    let Query(params) = params?;
    let page = state
        .service
        .get_available_resources(params.page, params.size)
        .await?;
    Ok(Json(page))
}

pub async fn update_resource<S: ResourceStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateResourceRequest>, JsonRejection>,
) -> ApiResult<Json<ResourceResponse>> {
    let Path(id) = id?;
    let Json(request) = payload?;
    state
        .service
        .update_resource(&id, request)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_resource_status<S: ResourceStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let Query(params) = params?;
    if state
        .service
        .update_resource_status(&id, params.status)
        .await?
    {
        Ok(Json(MessageResponse::new(
            "Resource status updated successfully",
        )))
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn delete_resource<S: ResourceStore>(
    State(state): State<AppState<S>>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    if state.service.delete_resource(&id).await? {
        Ok(Json(MessageResponse::new("Resource deleted successfully")))
    } else {
        Err(ApiError::NotFound)
    }
}

pub async fn list_resources_by_owner<S: ResourceStore>(
    State(state): State<AppState<S>>,
    owner_id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<ResourceResponse>>> {
    let Path(owner_id) = owner_id?;
    let resources = state.service.get_resources_by_owner(&owner_id).await?;
    Ok(Json(resources))
}
