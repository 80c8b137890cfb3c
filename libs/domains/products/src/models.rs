use chrono::{DateTime, Utc};
use database::mongodb::{option_uuid_as_string, uuid_as_string};
use media::MediaFile;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Inclusive bounds on the number of design images a product carries
pub const MIN_DESIGN_IMAGES: usize = 3;
pub const MAX_DESIGN_IMAGES: usize = 10;

/// Product entity as stored in MongoDB
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: String,
    /// Primary image URL
    pub image: String,
    /// Design image URLs, always 3 to 10
    pub design_images: Vec<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_uuid_as_string"
    )]
    pub holiday: Option<Uuid>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "option_uuid_as_string"
    )]
    pub category: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A referenced holiday or category, resolved to its display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Label {
    #[serde(rename = "_id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
}

/// Product with its holiday and category resolved; `null` when the
/// reference is absent or points at a deleted record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub design_images: Vec<String>,
    pub holiday: Option<Label>,
    pub category: Option<Label>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductView {
    pub fn new(product: Product, holiday: Option<Label>, category: Option<Label>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            description: product.description,
            image: product.image,
            design_images: product.design_images,
            holiday,
            category,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Text fields of a new product
#[derive(Debug, Clone, Default, Validate)]
pub struct CreateProduct {
    #[validate(
        length(max = 200, message = "El nombre no puede superar 200 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub price: f64,
    pub description: String,
    pub holiday: Option<Uuid>,
    pub category: Option<Uuid>,
}

/// Text fields of a product update; `None` keeps the stored value
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProduct {
    #[validate(
        length(max = 200, message = "El nombre no puede superar 200 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: Option<String>,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub price: Option<f64>,
    pub description: Option<String>,
    pub holiday: Option<Uuid>,
    pub category: Option<Uuid>,
}

/// Image files sent with a create or update request
#[derive(Debug, Clone, Default)]
pub struct ProductImages {
    pub image: Option<MediaFile>,
    pub design_images: Vec<MediaFile>,
}

/// Listing filter, exact match on references
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub holiday: Option<Uuid>,
    pub category: Option<Uuid>,
}

impl Product {
    pub fn new(input: CreateProduct, image: String, design_images: Vec<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            price: input.price,
            description: input.description.trim().to_string(),
            image,
            design_images,
            holiday: input.holiday,
            category: input.category,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply text changes and any newly uploaded image URLs
    pub fn apply_update(
        &mut self,
        update: UpdateProduct,
        image: Option<String>,
        design_images: Option<Vec<String>>,
    ) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if update.holiday.is_some() {
            self.holiday = update.holiday;
        }
        if update.category.is_some() {
            self.category = update.category;
        }
        if let Some(image) = image {
            self.image = image;
        }
        if let Some(design_images) = design_images {
            self.design_images = design_images;
        }
        self.updated_at = Utc::now();
    }
}

/// Multipart body of `POST /products` (documentation only)
#[derive(ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct ProductForm {
    name: String,
    price: f64,
    description: Option<String>,
    /// Holiday ID
    holiday: Option<Uuid>,
    /// Category ID
    category: Option<Uuid>,
    /// Primary image, exactly one on create
    #[schema(value_type = String, format = Binary)]
    image: Option<String>,
    /// 3 to 10 design images
    #[schema(value_type = Vec<String>, format = Binary)]
    design_images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new(
            CreateProduct {
                name: " Collar navideño ".to_string(),
                price: 19.99,
                description: "Collar con cascabel".to_string(),
                holiday: Some(Uuid::now_v7()),
                category: None,
            },
            "https://cdn.test/front.png".to_string(),
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        )
    }

    #[test]
    fn test_stored_document_uses_string_references() {
        let product = product();
        let doc = mongodb::bson::to_document(&product).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), product.id.to_string());
        assert_eq!(
            doc.get_str("holiday").unwrap(),
            product.holiday.unwrap().to_string()
        );
        assert!(!doc.contains_key("category"));
        assert!(doc.contains_key("designImages"));
    }

    #[test]
    fn test_update_without_images_keeps_urls() {
        let mut product = product();
        let before = product.design_images.clone();

        product.apply_update(
            UpdateProduct {
                price: Some(24.5),
                ..Default::default()
            },
            None,
            None,
        );

        assert_eq!(product.price, 24.5);
        assert_eq!(product.name, "Collar navideño");
        assert_eq!(product.image, "https://cdn.test/front.png");
        assert_eq!(product.design_images, before);
    }

    #[test]
    fn test_view_serializes_missing_references_as_null() {
        let product = product();
        let view = ProductView::new(product, None, None);
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["holiday"].is_null());
        assert!(json["category"].is_null());
        assert_eq!(json["designImages"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let input = CreateProduct {
            name: "Cama".to_string(),
            price: -1.0,
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }
}
