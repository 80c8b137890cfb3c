//! HTTP handlers for Reviews API

use axum::{
    extract::{DefaultBodyLimit, Path, State},
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
    MessageResponse, MultipartForm, UuidPath, ValidatedJson, DEFAULT_MAX_FILE_SIZE,
};
use chrono::{DateTime, Utc};
use media::MediaFile;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{
    ClientRef, CreateReview, ProductRef, RatingDistribution, ReviewForm, ReviewStats, ReviewView,
    UpdateReview, MAX_REVIEW_IMAGES,
};
use crate::references::ReviewReferences;
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

const BODY_LIMIT: usize = (MAX_REVIEW_IMAGES + 1) * DEFAULT_MAX_FILE_SIZE;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_reviews,
        create_review,
        get_review,
        update_review,
        delete_review,
        reviews_by_product,
        reviews_by_client,
        reviews_by_qualification,
        product_stats,
    ),
    components(
        schemas(
            ReviewView, ClientRef, ProductRef, ReviewForm, UpdateReview,
            ReviewStats, RatingDistribution, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Reviews", description = "Product reviews and rating stats")
    )
)]
pub struct ApiDoc;

pub fn router<R, F>(service: ReviewService<R, F>) -> Router
where
    R: ReviewRepository + 'static,
    F: ReviewReferences + 'static,
{
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
        .route("/product/{id}", get(reviews_by_product))
        .route("/client/{id}", get(reviews_by_client))
        .route("/qualification/{qualification}", get(reviews_by_qualification))
        .route("/stats/product/{id}", get(product_stats))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(Arc::new(service))
}

/// List all reviews, newest first
#[utoipa::path(
    get,
    path = "",
    tag = "Reviews",
    responses(
        (status = 200, description = "All reviews", body = Vec<ReviewView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
) -> ReviewResult<Json<Vec<ReviewView>>> {
    Ok(Json(service.list_reviews().await?))
}

/// Publish a review with optional photos
#[utoipa::path(
    post,
    path = "",
    tag = "Reviews",
    request_body(content = ReviewForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Review created", body = ReviewView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 413, description = "A photo exceeds 5 MB"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    form: MultipartForm,
) -> ReviewResult<impl IntoResponse> {
    let input = CreateReview {
        qualification: required(&form, "qualification", "La calificación es obligatoria")
            .and_then(parse_qualification)?,
        comment: form.text("comment").unwrap_or_default().to_string(),
        client: required(&form, "idClient", "El cliente es obligatorio")
            .and_then(|raw| parse_id(raw, "idClient"))?,
        product: required(&form, "idProduct", "El producto es obligatorio")
            .and_then(|raw| parse_id(raw, "idProduct"))?,
        published_at: form
            .text("publishedAt")
            .map(parse_published_at)
            .transpose()?,
    };

    let images = form
        .files("designImages")
        .into_iter()
        .map(|f| MediaFile::new(f.file_name, f.content_type, f.bytes))
        .collect();

    let review = service.create_review(input, images).await?;
    Ok((StatusCode::CREATED, Json(review)))
}

/// Get a review by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review found", body = ReviewView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_review<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<ReviewView>> {
    Ok(Json(service.get_review(id).await?))
}

/// Edit the comment of a review
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Review ID")),
    request_body = UpdateReview,
    responses(
        (status = 200, description = "Review updated", body = ReviewView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_review<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateReview>,
) -> ReviewResult<Json<ReviewView>> {
    Ok(Json(service.update_review(id, input).await?))
}

/// Delete a review
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Review ID")),
    responses(
        (status = 200, description = "Review deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_review<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<MessageResponse>> {
    service.delete_review(id).await?;
    Ok(Json(MessageResponse::new("Review deleted")))
}

/// Reviews of a product
#[utoipa::path(
    get,
    path = "/product/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Reviews of the product", body = Vec<ReviewView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reviews_by_product<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<Vec<ReviewView>>> {
    Ok(Json(service.reviews_by_product(id).await?))
}

/// Reviews written by a client
#[utoipa::path(
    get,
    path = "/client/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Reviews by the client", body = Vec<ReviewView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reviews_by_client<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<Vec<ReviewView>>> {
    Ok(Json(service.reviews_by_client(id).await?))
}

/// Reviews with exactly this qualification
#[utoipa::path(
    get,
    path = "/qualification/{qualification}",
    tag = "Reviews",
    params(("qualification" = u8, Path, description = "1 to 5")),
    responses(
        (status = 200, description = "Matching reviews", body = Vec<ReviewView>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn reviews_by_qualification<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    Path(raw): Path<String>,
) -> ReviewResult<Json<Vec<ReviewView>>> {
    let qualification = parse_qualification(&raw)?;
    Ok(Json(service.reviews_by_qualification(qualification).await?))
}

/// Rating summary of a product
#[utoipa::path(
    get,
    path = "/stats/product/{id}",
    tag = "Reviews",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Rating summary", body = ReviewStats),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn product_stats<R: ReviewRepository, F: ReviewReferences>(
    State(service): State<Arc<ReviewService<R, F>>>,
    UuidPath(id): UuidPath,
) -> ReviewResult<Json<ReviewStats>> {
    Ok(Json(service.product_stats(id).await?))
}

fn required<'a>(form: &'a MultipartForm, field: &str, message: &str) -> ReviewResult<&'a str> {
    form.text(field)
        .ok_or_else(|| ReviewError::Validation(message.to_string()))
}

fn parse_qualification(raw: &str) -> ReviewResult<u8> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| ReviewError::Validation("La calificación debe estar entre 1 y 5".to_string()))
}

fn parse_id(raw: &str, field: &str) -> ReviewResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| ReviewError::Validation(format!("El campo '{field}' no es un ID válido")))
}

fn parse_published_at(raw: &str) -> ReviewResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ReviewError::Validation("La fecha de publicación no es válida".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Review;
    use crate::references::MockReviewReferences;
    use crate::repository::MockReviewRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use media::InMemoryMediaStore;
    use serde_json::{json, Value};
    use test_utils::MultipartBody;
    use tower::ServiceExt;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn app(repo: MockReviewRepository, refs: MockReviewReferences) -> Router {
        router(ReviewService::new(
            repo,
            refs,
            Arc::new(InMemoryMediaStore::new()),
        ))
    }

    fn references() -> MockReviewReferences {
        let mut refs = MockReviewReferences::new();
        refs.expect_clients().returning(|ids| {
            Ok(ids
                .into_iter()
                .map(|id| ClientRef {
                    id,
                    name: "Marta".to_string(),
                    last_name: None,
                    email: Some("marta@correo.es".to_string()),
                })
                .collect())
        });
        refs.expect_products().returning(|ids| {
            Ok(ids
                .into_iter()
                .map(|id| ProductRef {
                    id,
                    name: "Bandana".to_string(),
                    price: 9.5,
                    image: "https://cdn.test/bandana.png".to_string(),
                })
                .collect())
        });
        refs
    }

    fn create_request(body: MultipartBody) -> Request<Body> {
        let (content_type, bytes) = body.build();
        Request::post("/")
            .header("content-type", content_type)
            .body(Body::from(bytes))
            .unwrap()
    }

    fn review_body(qualification: &str) -> MultipartBody {
        MultipartBody::new()
            .text("qualification", qualification)
            .text("comment", "Muy buena calidad")
            .text("idClient", &Uuid::now_v7().to_string())
            .text("idProduct", &Uuid::now_v7().to_string())
    }

    #[tokio::test]
    async fn test_create_with_three_photos_returns_201() {
        let mut repo = MockReviewRepository::new();
        repo.expect_create().returning(Ok);

        let response = app(repo, references())
            .oneshot(create_request(review_body("5").images("designImages", 3)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["qualification"], 5);
        assert_eq!(body["designImages"].as_array().unwrap().len(), 3);
        assert_eq!(body["client"]["name"], "Marta");
        assert_eq!(body["product"]["price"], 9.5);
        assert!(body["publishedAt"].is_string());
    }

    #[tokio::test]
    async fn test_create_with_qualification_six_is_400() {
        let response = app(MockReviewRepository::new(), MockReviewReferences::new())
            .oneshot(create_request(review_body("6")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "La calificación debe estar entre 1 y 5");
    }

    #[tokio::test]
    async fn test_create_with_six_photos_is_400() {
        let response = app(MockReviewRepository::new(), MockReviewReferences::new())
            .oneshot(create_request(review_body("4").images("designImages", 6)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_for_unknown_client_is_404() {
        let mut refs = MockReviewReferences::new();
        refs.expect_clients().returning(|_| Ok(Vec::new()));

        let response = app(MockReviewRepository::new(), refs)
            .oneshot(create_request(review_body("4")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "Client not found");
    }

    #[tokio::test]
    async fn test_qualification_route_rejects_text() {
        let response = app(MockReviewRepository::new(), MockReviewReferences::new())
            .oneshot(
                Request::get("/qualification/cinco")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_comment() {
        let review = Review::new(
            CreateReview {
                qualification: 2,
                comment: "Regular".to_string(),
                client: Uuid::now_v7(),
                product: Uuid::now_v7(),
                published_at: None,
            },
            Vec::new(),
        );
        let id = review.id;
        let mut repo = MockReviewRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(review.clone())));
        repo.expect_update().returning(Ok);

        let response = app(repo, references())
            .oneshot(
                Request::put(format!("/{id}"))
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"comment": "Mejor de lo esperado"}).to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["comment"], "Mejor de lo esperado");
        assert_eq!(body["qualification"], 2);
    }

    #[tokio::test]
    async fn test_stats_for_product_without_reviews() {
        let mut repo = MockReviewRepository::new();
        repo.expect_rating_buckets().returning(|_| Ok(Vec::new()));

        let response = app(repo, MockReviewReferences::new())
            .oneshot(
                Request::get(format!("/stats/product/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body,
            json!({
                "totalReviews": 0,
                "averageRating": 0.0,
                "ratingDistribution": {"1": 0, "2": 0, "3": 0, "4": 0, "5": 0}
            })
        );
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let mut repo = MockReviewRepository::new();
        repo.expect_delete()
            .returning(|id| Err(ReviewError::NotFound(id)));

        let response = app(repo, MockReviewReferences::new())
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
            "Review not found"
        );
    }
}
