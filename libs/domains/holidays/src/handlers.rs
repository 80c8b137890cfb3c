//! HTTP handlers for Holidays API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    MessageResponse, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::HolidayResult;
use crate::models::{CreateHoliday, Holiday, UpdateHoliday};
use crate::repository::HolidayRepository;
use crate::service::HolidayService;

#[derive(OpenApi)]
#[openapi(
    paths(list_holidays, create_holiday, get_holiday, update_holiday, delete_holiday),
    components(
        schemas(Holiday, CreateHoliday, UpdateHoliday, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Holidays", description = "Holiday labels for products")
    )
)]
pub struct ApiDoc;

pub fn router<R: HolidayRepository + 'static>(service: HolidayService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_holidays).post(create_holiday))
        .route(
            "/{id}",
            get(get_holiday).put(update_holiday).delete(delete_holiday),
        )
        .with_state(shared_service)
}

/// List all holidays
#[utoipa::path(
    get,
    path = "",
    tag = "Holidays",
    responses(
        (status = 200, description = "All holidays", body = Vec<Holiday>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_holidays<R: HolidayRepository>(
    State(service): State<Arc<HolidayService<R>>>,
) -> HolidayResult<Json<Vec<Holiday>>> {
    Ok(Json(service.list_holidays().await?))
}

/// Create a holiday
#[utoipa::path(
    post,
    path = "",
    tag = "Holidays",
    request_body = CreateHoliday,
    responses(
        (status = 201, description = "Holiday created", body = Holiday),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_holiday<R: HolidayRepository>(
    State(service): State<Arc<HolidayService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateHoliday>,
) -> HolidayResult<impl IntoResponse> {
    let holiday = service.create_holiday(input).await?;
    Ok((StatusCode::CREATED, Json(holiday)))
}

/// Get a holiday by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Holiday found", body = Holiday),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_holiday<R: HolidayRepository>(
    State(service): State<Arc<HolidayService<R>>>,
    UuidPath(id): UuidPath,
) -> HolidayResult<Json<Holiday>> {
    Ok(Json(service.get_holiday(id).await?))
}

/// Rename a holiday
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Holiday ID")),
    request_body = UpdateHoliday,
    responses(
        (status = 200, description = "Holiday updated", body = Holiday),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_holiday<R: HolidayRepository>(
    State(service): State<Arc<HolidayService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateHoliday>,
) -> HolidayResult<Json<Holiday>> {
    Ok(Json(service.update_holiday(id, input).await?))
}

/// Delete a holiday
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Holidays",
    params(("id" = Uuid, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Holiday deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_holiday<R: HolidayRepository>(
    State(service): State<Arc<HolidayService<R>>>,
    UuidPath(id): UuidPath,
) -> HolidayResult<Json<MessageResponse>> {
    service.delete_holiday(id).await?;
    Ok(Json(MessageResponse::new("Holiday deleted")))
}
