//! HTTP handlers for Products API
//!
//! Create and update take `multipart/form-data`: text fields plus an `image`
//! file and repeated `designImages` files.

use axum::{
    extract::{DefaultBodyLimit, State},
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
    MessageResponse, MultipartForm, UploadedFile, UuidPath, DEFAULT_MAX_FILE_SIZE,
};
use media::MediaFile;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::labels::LabelLookup;
use crate::models::{
    CreateProduct, Label, ProductForm, ProductImages, ProductView, UpdateProduct,
    MAX_DESIGN_IMAGES,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Room for a primary image and the maximum number of designs
const BODY_LIMIT: usize = (MAX_DESIGN_IMAGES + 2) * DEFAULT_MAX_FILE_SIZE;

#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        products_by_category,
        products_by_holiday,
    ),
    components(
        schemas(ProductView, Label, ProductForm, MessageResponse),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog")
    )
)]
pub struct ApiDoc;

pub fn router<R, L>(service: ProductService<R, L>) -> Router
where
    R: ProductRepository + 'static,
    L: LabelLookup + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/category/{id}", get(products_by_category))
        .route("/holiday/{id}", get(products_by_holiday))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products with resolved references", body = Vec<ProductView>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
) -> ProductResult<Json<Vec<ProductView>>> {
    Ok(Json(service.list_products().await?))
}

/// Create a product and upload its images
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Product created", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    form: MultipartForm,
) -> ProductResult<impl IntoResponse> {
    let Some(price) = form.text("price") else {
        return Err(ProductError::Validation("El precio es obligatorio".to_string()));
    };
    let input = CreateProduct {
        name: form.text("name").unwrap_or_default().to_string(),
        price: parse_price(price)?,
        description: form.text("description").unwrap_or_default().to_string(),
        holiday: parse_reference(&form, "holiday")?,
        category: parse_reference(&form, "category")?,
    };

    let product = service.create_product(input, images(&form)?).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductView),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductView>> {
    Ok(Json(service.get_product(id).await?))
}

/// Update any subset of a product's fields and images
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ProductForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product updated", body = ProductView),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    UuidPath(id): UuidPath,
    form: MultipartForm,
) -> ProductResult<Json<ProductView>> {
    let input = UpdateProduct {
        name: form.text("name").map(str::to_string),
        price: form.text("price").map(parse_price).transpose()?,
        description: form.text("description").map(str::to_string),
        holiday: parse_reference(&form, "holiday")?,
        category: parse_reference(&form, "category")?,
    };

    Ok(Json(service.update_product(id, input, images(&form)?).await?))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    service.delete_product(id).await?;
    Ok(Json(MessageResponse::new("Product deleted")))
}

/// Products in a category
#[utoipa::path(
    get,
    path = "/category/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products in the category", body = Vec<ProductView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Vec<ProductView>>> {
    Ok(Json(service.products_by_category(id).await?))
}

/// Products for a holiday
#[utoipa::path(
    get,
    path = "/holiday/{id}",
    tag = "Products",
    params(("id" = Uuid, Path, description = "Holiday ID")),
    responses(
        (status = 200, description = "Products for the holiday", body = Vec<ProductView>),
        (status = 400, response = BadRequestUuidResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_holiday<R: ProductRepository, L: LabelLookup>(
    State(service): State<Arc<ProductService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Vec<ProductView>>> {
    Ok(Json(service.products_by_holiday(id).await?))
}

fn parse_price(raw: &str) -> ProductResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| ProductError::Validation("El precio debe ser un número válido".to_string()))
}

fn parse_reference(form: &MultipartForm, field: &str) -> ProductResult<Option<Uuid>> {
    form.text(field)
        .map(|raw| {
            Uuid::parse_str(raw).map_err(|_| {
                ProductError::Validation(format!("El campo '{field}' no es un ID válido"))
            })
        })
        .transpose()
}

fn images(form: &MultipartForm) -> ProductResult<ProductImages> {
    let mut primary = form.files("image");
    if primary.len() > 1 {
        return Err(ProductError::Validation(
            "Solo se permite una imagen principal".to_string(),
        ));
    }

    Ok(ProductImages {
        image: primary.pop().map(to_media),
        design_images: form.files("designImages").into_iter().map(to_media).collect(),
    })
}

fn to_media(file: UploadedFile) -> MediaFile {
    MediaFile::new(file.file_name, file.content_type, file.bytes)
}
