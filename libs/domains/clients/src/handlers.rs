use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
    MessageResponse, UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ClientResult;
use crate::models::{Client, CreateClient, UpdateClient};
use crate::repository::ClientRepository;
use crate::service::ClientService;

#[derive(OpenApi)]
#[openapi(
    paths(list_clients, create_client, get_client, update_client, delete_client),
    components(
        schemas(Client, CreateClient, UpdateClient, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Clients", description = "Shop customers")
    )
)]
pub struct ApiDoc;

pub fn router<R: ClientRepository + 'static>(service: ClientService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_clients).post(create_client))
        .route(
            "/{id}",
            get(get_client).put(update_client).delete(delete_client),
        )
        .with_state(shared_service)
}

/// List all clients
#[utoipa::path(
    get,
    path = "",
    tag = "Clients",
    responses(
        (status = 200, description = "All clients", body = Vec<Client>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_clients<R: ClientRepository>(
    State(service): State<Arc<ClientService<R>>>,
) -> ClientResult<Json<Vec<Client>>> {
    Ok(Json(service.list_clients().await?))
}

/// Register a client
#[utoipa::path(
    post,
    path = "",
    tag = "Clients",
    request_body = CreateClient,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_client<R: ClientRepository>(
    State(service): State<Arc<ClientService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateClient>,
) -> ClientResult<impl IntoResponse> {
    let client = service.create_client(input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// Get a client by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_client<R: ClientRepository>(
    State(service): State<Arc<ClientService<R>>>,
    UuidPath(id): UuidPath,
) -> ClientResult<Json<Client>> {
    Ok(Json(service.get_client(id).await?))
}

/// Update a client
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    request_body = UpdateClient,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_client<R: ClientRepository>(
    State(service): State<Arc<ClientService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateClient>,
) -> ClientResult<Json<Client>> {
    Ok(Json(service.update_client(id, input).await?))
}

/// Delete a client
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Clients",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_client<R: ClientRepository>(
    State(service): State<Arc<ClientService<R>>>,
    UuidPath(id): UuidPath,
) -> ClientResult<Json<MessageResponse>> {
    service.delete_client(id).await?;
    Ok(Json(MessageResponse::new("Client deleted")))
}
