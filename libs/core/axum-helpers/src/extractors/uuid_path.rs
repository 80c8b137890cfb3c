//! UUID path parameter extractors with automatic validation.

use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

fn parse_uuid(raw: &str) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid UUID: {}", raw),
            ErrorCode::InvalidUuid,
        )
    })
}

/// Extractor for a single UUID path parameter.
///
/// ```ignore
/// async fn get_product(UuidPath(id): UuidPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        parse_uuid(&id).map(UuidPath)
    }
}

/// Extractor for routes with two UUID segments, such as
/// `/carts/{id}/products/{productId}`. Values come in declaration order.
pub struct UuidPathPair(pub Uuid, pub Uuid);

impl<S> FromRequestParts<S> for UuidPathPair
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path((first, second)) = Path::<(String, String)>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        Ok(UuidPathPair(parse_uuid(&first)?, parse_uuid(&second)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/items/{id}", get(|UuidPath(id): UuidPath| async move { id.to_string() }))
            .route(
                "/carts/{id}/products/{product_id}",
                get(|UuidPathPair(cart, product): UuidPathPair| async move {
                    format!("{cart}/{product}")
                }),
            )
    }

    async fn send(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_uuid_is_extracted() {
        let id = Uuid::now_v7();
        let (status, body) = send(&format!("/items/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, id.to_string());
    }

    #[tokio::test]
    async fn test_malformed_uuid_is_bad_request() {
        let (status, body) = send("/items/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("INVALID_UUID"));
        assert!(body.contains("not-a-uuid"));
    }

    #[tokio::test]
    async fn test_pair_keeps_declaration_order() {
        let cart = Uuid::now_v7();
        let product = Uuid::now_v7();
        let (status, body) = send(&format!("/carts/{cart}/products/{product}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, format!("{cart}/{product}"));
    }

    #[tokio::test]
    async fn test_pair_rejects_second_segment() {
        let cart = Uuid::now_v7();
        let (status, _) = send(&format!("/carts/{cart}/products/42")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
