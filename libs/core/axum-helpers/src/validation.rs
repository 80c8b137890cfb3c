//! Field validators shared by the domain DTOs.
//!
//! ```ignore
//! #[derive(Validate)]
//! struct UpdateReview {
//!     #[validate(custom(function = "axum_helpers::validation::not_blank"))]
//!     comment: String,
//! }
//! ```

use std::borrow::Cow;
use validator::ValidationError;

/// Rejects empty and whitespace-only strings
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}
