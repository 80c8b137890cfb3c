//! HTTP handlers for Employees and Vets
//!
//! Two routers, mounted by the app at `/api/employees` and `/api/vets`.

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

use crate::error::StaffResult;
use crate::models::{CreateEmployee, CreateVet, Employee, UpdateEmployee, UpdateVet, Vet};
use crate::repository::{EmployeeRepository, VetRepository};
use crate::service::{EmployeeService, VetService};

/// Paths are relative to the app's `/api` prefix
#[derive(OpenApi)]
#[openapi(
    paths(
        list_employees,
        create_employee,
        get_employee,
        update_employee,
        delete_employee,
        list_vets,
        create_vet,
        get_vet,
        update_vet,
        delete_vet,
    ),
    components(
        schemas(
            Employee, CreateEmployee, UpdateEmployee,
            Vet, CreateVet, UpdateVet,
            MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Employees", description = "Shop employees"),
        (name = "Vets", description = "Veterinarians")
    )
)]
pub struct ApiDoc;

pub fn employees_router<R: EmployeeRepository + 'static>(service: EmployeeService<R>) -> Router {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
        .with_state(Arc::new(service))
}

pub fn vets_router<R: VetRepository + 'static>(service: VetService<R>) -> Router {
    Router::new()
        .route("/", get(list_vets).post(create_vet))
        .route("/{id}", get(get_vet).put(update_vet).delete(delete_vet))
        .with_state(Arc::new(service))
}

#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_employees<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
) -> StaffResult<Json<Vec<Employee>>> {
    Ok(Json(service.list_employees().await?))
}

#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateEmployee>,
) -> StaffResult<impl IntoResponse> {
    let employee = service.create_employee(input).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    UuidPath(id): UuidPath,
) -> StaffResult<Json<Employee>> {
    Ok(Json(service.get_employee(id).await?))
}

#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateEmployee>,
) -> StaffResult<Json<Employee>> {
    Ok(Json(service.update_employee(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    UuidPath(id): UuidPath,
) -> StaffResult<Json<MessageResponse>> {
    service.delete_employee(id).await?;
    Ok(Json(MessageResponse::new("Employee deleted")))
}

#[utoipa::path(
    get,
    path = "/vets",
    tag = "Vets",
    responses(
        (status = 200, description = "All vets", body = Vec<Vet>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_vets<R: VetRepository>(
    State(service): State<Arc<VetService<R>>>,
) -> StaffResult<Json<Vec<Vet>>> {
    Ok(Json(service.list_vets().await?))
}

#[utoipa::path(
    post,
    path = "/vets",
    tag = "Vets",
    request_body = CreateVet,
    responses(
        (status = 201, description = "Vet created", body = Vet),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_vet<R: VetRepository>(
    State(service): State<Arc<VetService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateVet>,
) -> StaffResult<impl IntoResponse> {
    let vet = service.create_vet(input).await?;
    Ok((StatusCode::CREATED, Json(vet)))
}

#[utoipa::path(
    get,
    path = "/vets/{id}",
    tag = "Vets",
    params(("id" = Uuid, Path, description = "Vet ID")),
    responses(
        (status = 200, description = "Vet found", body = Vet),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_vet<R: VetRepository>(
    State(service): State<Arc<VetService<R>>>,
    UuidPath(id): UuidPath,
) -> StaffResult<Json<Vet>> {
    Ok(Json(service.get_vet(id).await?))
}

#[utoipa::path(
    put,
    path = "/vets/{id}",
    tag = "Vets",
    params(("id" = Uuid, Path, description = "Vet ID")),
    request_body = UpdateVet,
    responses(
        (status = 200, description = "Vet updated", body = Vet),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_vet<R: VetRepository>(
    State(service): State<Arc<VetService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateVet>,
) -> StaffResult<Json<Vet>> {
    Ok(Json(service.update_vet(id, input).await?))
}

#[utoipa::path(
    delete,
    path = "/vets/{id}",
    tag = "Vets",
    params(("id" = Uuid, Path, description = "Vet ID")),
    responses(
        (status = 200, description = "Vet deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_vet<R: VetRepository>(
    State(service): State<Arc<VetService<R>>>,
    UuidPath(id): UuidPath,
) -> StaffResult<Json<MessageResponse>> {
    service.delete_vet(id).await?;
    Ok(Json(MessageResponse::new("Vet deleted")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StaffError;
    use crate::repository::{MockEmployeeRepository, MockVetRepository};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn vet_body() -> Value {
        json!({
            "name": "Ana",
            "lastName": "Ruiz",
            "email": "ana@vets.com",
            "taxId": "12345678Z",
            "licenseNumber": "COL-2231",
            "hireDate": "2021-03-01"
        })
    }

    #[tokio::test]
    async fn test_create_vet_returns_201() {
        let mut repo = MockVetRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_exists_by_tax_id().returning(|_| Ok(false));
        repo.expect_create().returning(|input| Ok(Vet::new(input)));

        let app = vets_router(VetService::new(repo));
        let response = app
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(vet_body().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["taxId"], "12345678Z");
        assert_eq!(body["hireDate"], "2021-03-01");
    }

    #[tokio::test]
    async fn test_duplicate_vet_email_is_409() {
        let mut repo = MockVetRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));

        let app = vets_router(VetService::new(repo));
        let response = app
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(vet_body().to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body["message"],
            "A vet with email 'ana@vets.com' already exists"
        );
    }

    #[tokio::test]
    async fn test_delete_missing_employee_is_404() {
        let mut repo = MockEmployeeRepository::new();
        repo.expect_delete()
            .returning(|id| Err(StaffError::EmployeeNotFound(id)));

        let app = employees_router(EmployeeService::new(repo));
        let response = app
            .oneshot(
                Request::delete(format!("/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response.into_body()).await["message"],
            "Employee not found"
        );
    }

    #[tokio::test]
    async fn test_employee_with_bad_date_is_rejected() {
        let repo = MockEmployeeRepository::new();
        let app = employees_router(EmployeeService::new(repo));

        let response = app
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "name": "Pablo",
                            "lastName": "Sanz",
                            "email": "pablo@bandoggie.com",
                            "position": "Dependiente",
                            "employeeCode": "EMP-001",
                            "hireDate": "15/01/2020"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
