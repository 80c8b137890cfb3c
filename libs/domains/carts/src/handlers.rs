//! HTTP handlers for Carts API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    MessageResponse, UuidPath, UuidPathPair, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::catalog::CartCatalog;
use crate::error::CartResult;
use crate::models::{
    Cart, CartItem, CartStats, CartStatus, CreateCart, ItemInput, Size, UpdateCart,
};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_carts,
        create_cart,
        cart_stats,
        get_cart,
        update_cart,
        delete_cart,
        carts_by_client,
        add_product,
        remove_product,
        clear_cart,
    ),
    components(
        schemas(
            Cart, CartItem, CartStatus, Size, CreateCart, UpdateCart, ItemInput,
            CartStats, MessageResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Carts", description = "Shopping carts")
    )
)]
pub struct ApiDoc;

pub fn router<R, C>(service: CartService<R, C>) -> Router
where
    R: CartRepository + 'static,
    C: CartCatalog + 'static,
{
    Router::new()
        .route("/", get(list_carts).post(create_cart))
        .route("/stats", get(cart_stats))
        .route("/client/{id}", get(carts_by_client))
        .route("/{id}", get(get_cart).put(update_cart).delete(delete_cart))
        .route("/{id}/products", post(add_product))
        .route("/{id}/products/{product_id}", delete(remove_product))
        .route("/{id}/clear", put(clear_cart))
        .with_state(Arc::new(service))
}

/// List all carts
#[utoipa::path(
    get,
    path = "",
    tag = "Carts",
    responses(
        (status = 200, description = "All carts", body = Vec<Cart>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_carts<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
) -> CartResult<Json<Vec<Cart>>> {
    Ok(Json(service.list_carts().await?))
}

/// Open a cart for a client
#[utoipa::path(
    post,
    path = "",
    tag = "Carts",
    request_body = CreateCart,
    responses(
        (status = 201, description = "Cart created", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_cart<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    ValidatedJson(input): ValidatedJson<CreateCart>,
) -> CartResult<impl IntoResponse> {
    let cart = service.create_cart(input).await?;
    Ok((StatusCode::CREATED, Json(cart)))
}

/// Store-wide cart summary
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Carts",
    responses(
        (status = 200, description = "Cart statistics", body = CartStats),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn cart_stats<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
) -> CartResult<Json<CartStats>> {
    Ok(Json(service.cart_stats().await?))
}

/// Get a cart by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart found", body = Cart),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_cart<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.get_cart(id).await?))
}

/// Replace the items and/or change the status
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Cart ID")),
    request_body = UpdateCart,
    responses(
        (status = 200, description = "Cart updated", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_cart<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateCart>,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.update_cart(id, input).await?))
}

/// Delete a cart
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Cart deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_cart<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
) -> CartResult<Json<MessageResponse>> {
    service.delete_cart(id).await?;
    Ok(Json(MessageResponse::new("Cart deleted")))
}

/// Carts of a client
#[utoipa::path(
    get,
    path = "/client/{id}",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Carts of the client", body = Vec<Cart>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn carts_by_client<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
) -> CartResult<Json<Vec<Cart>>> {
    Ok(Json(service.carts_by_client(id).await?))
}

/// Add a product line, merging with a line of the same product and size
#[utoipa::path(
    post,
    path = "/{id}/products",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Cart ID")),
    request_body = ItemInput,
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(item): ValidatedJson<ItemInput>,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.add_product(id, item).await?))
}

/// Remove every line of a product
#[utoipa::path(
    delete,
    path = "/{id}/products/{product_id}",
    tag = "Carts",
    params(
        ("id" = Uuid, Path, description = "Cart ID"),
        ("product_id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_product<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPathPair(id, product): UuidPathPair,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.remove_product(id, product).await?))
}

/// Empty a cart
#[utoipa::path(
    put,
    path = "/{id}/clear",
    tag = "Carts",
    params(("id" = Uuid, Path, description = "Cart ID")),
    responses(
        (status = 200, description = "Emptied cart", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn clear_cart<R: CartRepository, C: CartCatalog>(
    State(service): State<Arc<CartService<R, C>>>,
    UuidPath(id): UuidPath,
) -> CartResult<Json<Cart>> {
    Ok(Json(service.clear_cart(id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCartCatalog;
    use crate::models::StatusBucket;
    use crate::repository::MockCartRepository;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn json_body(body: Body) -> Value {
        let bytes = body.collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_returns_priced_cart() {
        let product = Uuid::now_v7();
        let mut catalog = MockCartCatalog::new();
        catalog.expect_client_exists().returning(|_| Ok(true));
        catalog
            .expect_product_prices()
            .returning(move |_| Ok(HashMap::from([(product, 4.25)])));
        let mut repo = MockCartRepository::new();
        repo.expect_create().returning(Ok);

        let app = router(CartService::new(repo, catalog));
        let response = app
            .oneshot(json_request(
                "POST",
                "/",
                json!({
                    "idClient": Uuid::now_v7(),
                    "items": [{"idProduct": product, "quantity": 2, "size": "M"}]
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["total"], 8.5);
        assert_eq!(body["items"][0]["subtotal"], 8.5);
        assert_eq!(body["items"][0]["size"], "M");
        assert_eq!(body["status"], "Pending");
    }

    #[tokio::test]
    async fn test_zero_quantity_is_400() {
        let app = router(CartService::new(
            MockCartRepository::new(),
            MockCartCatalog::new(),
        ));
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{}/products", Uuid::now_v7()),
                json!({"idProduct": Uuid::now_v7(), "quantity": 0}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "La cantidad debe estar entre 1 y 999");
    }

    #[tokio::test]
    async fn test_merge_past_line_limit_is_400() {
        let product = Uuid::now_v7();
        let mut cart = Cart::new(Uuid::now_v7());
        cart.add_item(product, 999, None, 1.0).unwrap();
        let cart_id = cart.id;

        let mut repo = MockCartRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(cart.clone())));
        repo.expect_update().never();
        let mut catalog = MockCartCatalog::new();
        catalog
            .expect_product_prices()
            .returning(move |_| Ok(HashMap::from([(product, 1.0)])));

        let app = router(CartService::new(repo, catalog));
        let response = app
            .oneshot(json_request(
                "POST",
                &format!("/{cart_id}/products"),
                json!({"idProduct": product, "quantity": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["message"], "La cantidad no puede superar 999");
    }

    #[tokio::test]
    async fn test_remove_missing_product_is_404() {
        let cart = Cart::new(Uuid::now_v7());
        let cart_id = cart.id;
        let mut repo = MockCartRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(cart.clone())));

        let app = router(CartService::new(repo, MockCartCatalog::new()));
        let response = app
            .oneshot(
                Request::delete(format!("/{cart_id}/products/{}", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response.into_body()).await["message"],
            "Product not found in cart"
        );
    }

    #[tokio::test]
    async fn test_remove_with_bad_product_id_is_400() {
        let app = router(CartService::new(
            MockCartRepository::new(),
            MockCartCatalog::new(),
        ));
        let response = app
            .oneshot(
                Request::delete(format!("/{}/products/collar", Uuid::now_v7()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_clear_paid_cart_is_400() {
        let mut cart = Cart::new(Uuid::now_v7());
        cart.set_status(CartStatus::Paid);
        let cart_id = cart.id;
        let mut repo = MockCartRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(cart.clone())));

        let app = router(CartService::new(repo, MockCartCatalog::new()));
        let response = app
            .oneshot(
                Request::put(format!("/{cart_id}/clear"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_stats_route_is_not_an_id() {
        let mut repo = MockCartRepository::new();
        repo.expect_status_buckets().returning(|| {
            Ok(vec![StatusBucket {
                status: CartStatus::Paid,
                count: 2,
                total: 50.0,
                items: 6,
            }])
        });

        let app = router(CartService::new(repo, MockCartCatalog::new()));
        let response = app
            .oneshot(Request::get("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response.into_body()).await;
        assert_eq!(body["totalCarts"], 2);
        assert_eq!(body["totalRevenue"], 50.0);
        assert_eq!(body["averageCartTotal"], 25.0);
        assert_eq!(body["totalItems"], 6);
    }
}
