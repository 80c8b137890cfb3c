use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(Uuid),

    #[error("Client not found: {0}")]
    ClientNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product {product} is not in cart {cart}")]
    ItemNotFound { cart: Uuid, product: Uuid },

    #[error("Product {product} would exceed {max} units in one line")]
    QuantityLimit { product: Uuid, max: u32 },

    #[error("Cart {0} is already paid")]
    AlreadyPaid(Uuid),

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CartResult<T> = Result<T, CartError>;

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::NotFound(_) => AppError::NotFound("Cart not found".to_string()),
            CartError::ClientNotFound(_) => AppError::NotFound("Client not found".to_string()),
            CartError::ProductNotFound(_) => AppError::NotFound("Product not found".to_string()),
            CartError::ItemNotFound { .. } => {
                AppError::NotFound("Product not found in cart".to_string())
            }
            CartError::QuantityLimit { max, .. } => {
                AppError::BadRequest(format!("La cantidad no puede superar {max}"))
            }
            CartError::AlreadyPaid(_) => {
                AppError::BadRequest("No se puede modificar un carrito pagado".to_string())
            }
            CartError::Validation(errors) => AppError::ValidationError(errors),
            CartError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CartError {
    fn from(err: mongodb::error::Error) -> Self {
        CartError::Database(err.to_string())
    }
}
