use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::catalog::CartCatalog;
use crate::error::{CartError, CartResult};
use crate::models::{Cart, CartFilter, CartStats, CreateCart, ItemInput, UpdateCart};
use crate::repository::CartRepository;

/// Cart operations. Every write prices its lines from the catalog and leaves
/// `total` equal to the sum of the line subtotals.
pub struct CartService<R: CartRepository, C: CartCatalog> {
    repository: Arc<R>,
    catalog: Arc<C>,
}

impl<R: CartRepository, C: CartCatalog> CartService<R, C> {
    pub fn new(repository: R, catalog: C) -> Self {
        Self {
            repository: Arc::new(repository),
            catalog: Arc::new(catalog),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_carts(&self) -> CartResult<Vec<Cart>> {
        self.repository.list(CartFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn get_cart(&self, id: Uuid) -> CartResult<Cart> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(CartError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn carts_by_client(&self, client: Uuid) -> CartResult<Vec<Cart>> {
        self.repository
            .list(CartFilter {
                client: Some(client),
            })
            .await
    }

    #[instrument(skip(self, input), fields(client_id = %input.client, items = input.items.len()))]
    pub async fn create_cart(&self, input: CreateCart) -> CartResult<Cart> {
        input.validate()?;

        if !self.catalog.client_exists(input.client).await? {
            return Err(CartError::ClientNotFound(input.client));
        }

        let mut cart = Cart::new(input.client);
        self.add_items(&mut cart, &input.items).await?;

        self.repository.create(cart).await
    }

    /// Replace the lines and/or change the status. Line changes are refused
    /// while the stored cart is paid.
    #[instrument(skip(self, input))]
    pub async fn update_cart(&self, id: Uuid, input: UpdateCart) -> CartResult<Cart> {
        input.validate()?;

        let mut cart = self.get_cart(id).await?;

        if let Some(items) = &input.items {
            ensure_open(&cart)?;
            cart.clear();
            self.add_items(&mut cart, items).await?;
        }
        if let Some(status) = input.status {
            cart.set_status(status);
        }

        self.repository.update(cart).await
    }

    #[instrument(skip(self))]
    pub async fn delete_cart(&self, id: Uuid) -> CartResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self, item), fields(product_id = %item.product, quantity = item.quantity))]
    pub async fn add_product(&self, id: Uuid, item: ItemInput) -> CartResult<Cart> {
        item.validate()?;

        let mut cart = self.get_cart(id).await?;
        ensure_open(&cart)?;
        self.add_items(&mut cart, std::slice::from_ref(&item)).await?;

        self.repository.update(cart).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: Uuid, product: Uuid) -> CartResult<Cart> {
        let mut cart = self.get_cart(id).await?;
        ensure_open(&cart)?;

        if !cart.remove_product(product) {
            return Err(CartError::ItemNotFound { cart: id, product });
        }

        self.repository.update(cart).await
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, id: Uuid) -> CartResult<Cart> {
        let mut cart = self.get_cart(id).await?;
        ensure_open(&cart)?;
        cart.clear();

        self.repository.update(cart).await
    }

    #[instrument(skip(self))]
    pub async fn cart_stats(&self) -> CartResult<CartStats> {
        let buckets = self.repository.status_buckets().await?;
        Ok(CartStats::from_buckets(&buckets))
    }

    /// Price `items` with one catalog lookup and merge them into `cart`
    async fn add_items(&self, cart: &mut Cart, items: &[ItemInput]) -> CartResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut ids: Vec<Uuid> = items.iter().map(|i| i.product).collect();
        ids.sort_unstable();
        ids.dedup();
        let prices: HashMap<Uuid, f64> = self.catalog.product_prices(ids).await?;

        for item in items {
            let price = prices
                .get(&item.product)
                .copied()
                .ok_or(CartError::ProductNotFound(item.product))?;
            cart.add_item(item.product, item.quantity, item.size, price)?;
        }
        Ok(())
    }
}

impl<R: CartRepository, C: CartCatalog> Clone for CartService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

fn ensure_open(cart: &Cart) -> CartResult<()> {
    if cart.is_paid() {
        return Err(CartError::AlreadyPaid(cart.id));
    }
    Ok(())
}
