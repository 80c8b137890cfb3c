use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CartError, CartResult};

/// Most units of one product and size a cart line may hold
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Cart payment status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
pub enum CartStatus {
    #[default]
    Pending,
    Paid,
}

/// Garment size of a line item
#[allow(clippy::upper_case_acronyms)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
}

/// One product line of a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(with = "uuid_as_string")]
    pub product: Uuid,
    pub quantity: u32,
    /// Unit price times quantity, in cents precision
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

/// Cart entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    #[serde(with = "uuid_as_string")]
    pub client: Uuid,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Always the sum of the item subtotals
    pub total: f64,
    #[serde(default)]
    pub status: CartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product to put in a cart
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    #[serde(rename = "idProduct")]
    pub product: Uuid,
    #[validate(range(min = 1, max = 999, message = "La cantidad debe estar entre 1 y 999"))]
    pub quantity: u32,
    pub size: Option<Size>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCart {
    #[serde(rename = "idClient")]
    pub client: Uuid,
    #[serde(default)]
    #[validate(nested)]
    pub items: Vec<ItemInput>,
}

/// `items` replaces every line when present
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCart {
    #[validate(nested)]
    pub items: Option<Vec<ItemInput>>,
    pub status: Option<CartStatus>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CartFilter {
    pub client: Option<Uuid>,
}

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl CartItem {
    pub fn priced(product: Uuid, quantity: u32, size: Option<Size>, unit_price: f64) -> Self {
        Self {
            product,
            quantity,
            subtotal: round_cents(unit_price * f64::from(quantity)),
            size,
        }
    }
}

impl Cart {
    pub fn new(client: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            client,
            items: Vec::new(),
            total: 0.0,
            status: CartStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status == CartStatus::Paid
    }

    /// Add `quantity` of a product. A line with the same product and size
    /// absorbs the quantity and is repriced at `unit_price`. The cart is left
    /// untouched when the line would exceed [`MAX_LINE_QUANTITY`].
    pub fn add_item(
        &mut self,
        product: Uuid,
        quantity: u32,
        size: Option<Size>,
        unit_price: f64,
    ) -> CartResult<()> {
        let line = self
            .items
            .iter_mut()
            .find(|item| item.product == product && item.size == size);
        let merged = line
            .as_ref()
            .map_or(Some(quantity), |item| item.quantity.checked_add(quantity))
            .filter(|total| *total <= MAX_LINE_QUANTITY)
            .ok_or(CartError::QuantityLimit {
                product,
                max: MAX_LINE_QUANTITY,
            })?;

        let priced = CartItem::priced(product, merged, size, unit_price);
        match line {
            Some(item) => *item = priced,
            None => self.items.push(priced),
        }
        self.touch();
        Ok(())
    }

    /// Drop every line of `product`; false when the cart had none
    pub fn remove_product(&mut self, product: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product != product);
        let removed = self.items.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    pub fn set_status(&mut self, status: CartStatus) {
        self.status = status;
        self.touch();
    }

    fn touch(&mut self) {
        self.total = round_cents(self.items.iter().map(|item| item.subtotal).sum());
        self.updated_at = Utc::now();
    }
}

/// One `$group` row of the stats aggregation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct StatusBucket {
    #[serde(rename = "_id")]
    pub status: CartStatus,
    pub count: u64,
    pub total: f64,
    pub items: u64,
}

/// Store-wide cart summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartStats {
    pub total_carts: u64,
    pub pending_carts: u64,
    pub paid_carts: u64,
    /// Sum of paid cart totals
    pub total_revenue: f64,
    pub average_cart_total: f64,
    /// Units across every cart
    pub total_items: u64,
}

impl CartStats {
    pub fn from_buckets(buckets: &[StatusBucket]) -> Self {
        let mut stats = Self::default();
        let mut grand_total = 0.0;

        for bucket in buckets {
            match bucket.status {
                CartStatus::Pending => stats.pending_carts += bucket.count,
                CartStatus::Paid => {
                    stats.paid_carts += bucket.count;
                    stats.total_revenue += bucket.total;
                }
            }
            stats.total_carts += bucket.count;
            stats.total_items += bucket.items;
            grand_total += bucket.total;
        }

        stats.total_revenue = round_cents(stats.total_revenue);
        if stats.total_carts > 0 {
            stats.average_cart_total = round_cents(grand_total / stats.total_carts as f64);
        }
        stats
    }
}
