use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A review carries no photos or between 3 and 5
pub const MIN_REVIEW_IMAGES: usize = 3;
pub const MAX_REVIEW_IMAGES: usize = 5;

pub const MIN_QUALIFICATION: u8 = 1;
pub const MAX_QUALIFICATION: u8 = 5;

/// Review entity as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub qualification: u8,
    pub comment: String,
    #[serde(default)]
    pub design_images: Vec<String>,
    #[serde(with = "uuid_as_string")]
    pub client: Uuid,
    #[serde(with = "uuid_as_string")]
    pub product: Uuid,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The reviewing client, as shown on a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    #[serde(rename = "_id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// The reviewed product, as shown on a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductRef {
    #[serde(rename = "_id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub image: String,
}

/// Review with client and product resolved; `null` when dangling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub qualification: u8,
    pub comment: String,
    pub design_images: Vec<String>,
    pub client: Option<ClientRef>,
    pub product: Option<ProductRef>,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn new(review: Review, client: Option<ClientRef>, product: Option<ProductRef>) -> Self {
        Self {
            id: review.id,
            qualification: review.qualification,
            comment: review.comment,
            design_images: review.design_images,
            client,
            product,
            published_at: review.published_at,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "La calificación debe estar entre 1 y 5"))]
    pub qualification: u8,
    #[validate(
        length(max = 1000, message = "El comentario no puede superar 1000 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El comentario es obligatorio"
        )
    )]
    pub comment: String,
    pub client: Uuid,
    pub product: Uuid,
    /// Defaults to the creation time
    pub published_at: Option<DateTime<Utc>>,
}

/// Only the comment of a review can change
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    #[validate(
        length(max = 1000, message = "El comentario no puede superar 1000 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El comentario es obligatorio"
        )
    )]
    pub comment: String,
}

/// Listing filter, exact match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub product: Option<Uuid>,
    pub client: Option<Uuid>,
    pub qualification: Option<u8>,
}

impl Review {
    pub fn new(input: CreateReview, design_images: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            qualification: input.qualification,
            comment: input.comment.trim().to_string(),
            design_images,
            client: input.client,
            product: input.product,
            published_at: input.published_at.unwrap_or(now),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateReview) {
        self.comment = update.comment.trim().to_string();
        self.updated_at = Utc::now();
    }
}

/// One `$group` row of the stats aggregation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RatingBucket {
    #[serde(rename = "_id")]
    pub qualification: i64,
    pub count: u64,
}

/// Review count per qualification
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RatingDistribution {
    #[serde(rename = "1")]
    pub one: u64,
    #[serde(rename = "2")]
    pub two: u64,
    #[serde(rename = "3")]
    pub three: u64,
    #[serde(rename = "4")]
    pub four: u64,
    #[serde(rename = "5")]
    pub five: u64,
}

impl RatingDistribution {
    fn slot(&mut self, qualification: i64) -> Option<&mut u64> {
        match qualification {
            1 => Some(&mut self.one),
            2 => Some(&mut self.two),
            3 => Some(&mut self.three),
            4 => Some(&mut self.four),
            5 => Some(&mut self.five),
            _ => None,
        }
    }
}

/// Rating summary of one product
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_reviews: u64,
    /// Rounded to 2 decimals, 0 without reviews
    pub average_rating: f64,
    pub rating_distribution: RatingDistribution,
}

impl ReviewStats {
    /// Fold aggregation buckets; qualifications outside 1..=5 are ignored
    pub fn from_buckets(buckets: &[RatingBucket]) -> Self {
        let mut stats = Self::default();
        let mut sum = 0u64;

        for bucket in buckets {
            let Some(slot) = stats.rating_distribution.slot(bucket.qualification) else {
                continue;
            };
            *slot += bucket.count;
            stats.total_reviews += bucket.count;
            sum += bucket.qualification as u64 * bucket.count;
        }

        if stats.total_reviews > 0 {
            let average = sum as f64 / stats.total_reviews as f64;
            stats.average_rating = (average * 100.0).round() / 100.0;
        }
        stats
    }
}

/// Multipart body of `POST /reviews` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct ReviewForm {
    /// 1 to 5
    qualification: u8,
    comment: String,
    /// Client ID
    id_client: Uuid,
    /// Product ID
    id_product: Uuid,
    /// RFC 3339 timestamp, defaults to now
    published_at: Option<DateTime<Utc>>,
    /// None, or 3 to 5 photos of at most 5 MB each
    #[schema(value_type = Vec<String>, format = Binary)]
    design_images: Vec<String>,
}
