//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the BanDoggie API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BanDoggie API",
        version = "0.1.0",
        description = "Pet accessory shop: catalog, reviews, carts, clients and staff",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc),
        (path = "/api/reviews", api = domain_reviews::ApiDoc),
        (path = "/api/holidays", api = domain_holidays::ApiDoc),
        (path = "/api/categories", api = domain_categories::ApiDoc),
        (path = "/api/carts", api = domain_carts::ApiDoc),
        (path = "/api/clients", api = domain_clients::ApiDoc),
        (path = "/api", api = domain_staff::ApiDoc)
    )
)]
pub struct ApiDoc;
