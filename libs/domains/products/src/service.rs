use media::{rollback, upload_batch, MediaFile, MediaStore, StoredMedia};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::labels::LabelLookup;
use crate::models::{
    CreateProduct, Label, Product, ProductFilter, ProductImages, ProductView, UpdateProduct,
    MAX_DESIGN_IMAGES, MIN_DESIGN_IMAGES,
};
use crate::repository::ProductRepository;

const DEFAULT_FOLDER: &str = "bandoggie/products";
const DEFAULT_UPLOAD_CONCURRENCY: usize = 4;

/// Product catalog operations.
///
/// Writes validate every rule before the first upload; uploads run as one
/// batch and are deleted again if the batch or the following database write
/// fails.
pub struct ProductService<R: ProductRepository, L: LabelLookup> {
    repository: Arc<R>,
    labels: Arc<L>,
    media: Arc<dyn MediaStore>,
    folder: String,
    upload_concurrency: usize,
}

impl<R: ProductRepository, L: LabelLookup> ProductService<R, L> {
    pub fn new(repository: R, labels: L, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repository: Arc::new(repository),
            labels: Arc::new(labels),
            media,
            folder: DEFAULT_FOLDER.to_string(),
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
        }
    }

    /// Media host folder for product images
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_upload_concurrency(mut self, concurrency: usize) -> Self {
        self.upload_concurrency = concurrency.max(1);
        self
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<ProductView>> {
        let products = self.repository.list(ProductFilter::default()).await?;
        self.resolve_references(products).await
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<ProductView> {
        let product = self.find(id).await?;
        self.resolve_one(product).await
    }

    #[instrument(skip(self))]
    pub async fn products_by_category(&self, category: Uuid) -> ProductResult<Vec<ProductView>> {
        let filter = ProductFilter {
            category: Some(category),
            ..Default::default()
        };
        let products = self.repository.list(filter).await?;
        self.resolve_references(products).await
    }

    #[instrument(skip(self))]
    pub async fn products_by_holiday(&self, holiday: Uuid) -> ProductResult<Vec<ProductView>> {
        let filter = ProductFilter {
            holiday: Some(holiday),
            ..Default::default()
        };
        let products = self.repository.list(filter).await?;
        self.resolve_references(products).await
    }

    #[instrument(skip(self, input, images), fields(product_name = %input.name, designs = images.design_images.len()))]
    pub async fn create_product(
        &self,
        input: CreateProduct,
        images: ProductImages,
    ) -> ProductResult<ProductView> {
        let Some(image) = images.image else {
            return Err(ProductError::Validation(
                "Se requiere una imagen principal".to_string(),
            ));
        };
        check_design_count(&images.design_images)?;
        check_content_types(std::iter::once(&image).chain(&images.design_images))?;
        input.validate()?;

        let mut files = Vec::with_capacity(images.design_images.len() + 1);
        files.push(image);
        files.extend(images.design_images);

        let stored = self.upload(&files).await?;
        let (primary, designs) = split_primary(&stored);
        let product = Product::new(input, primary, designs);

        match self.repository.create(product).await {
            Ok(product) => {
                tracing::info!(product_id = %product.id, "Product created");
                self.resolve_one(product).await
            }
            Err(e) => {
                rollback(self.media.as_ref(), &stored).await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self, input, images))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
        images: ProductImages,
    ) -> ProductResult<ProductView> {
        if !images.design_images.is_empty() {
            check_design_count(&images.design_images)?;
        }
        check_content_types(images.image.iter().chain(&images.design_images))?;
        input.validate()?;

        let mut product = self.find(id).await?;

        let has_image = images.image.is_some();
        let has_designs = !images.design_images.is_empty();
        let files: Vec<MediaFile> = images
            .image
            .into_iter()
            .chain(images.design_images)
            .collect();

        let stored = self.upload(&files).await?;
        let (image, designs) = match (has_image, has_designs) {
            (true, true) => {
                let (primary, designs) = split_primary(&stored);
                (Some(primary), Some(designs))
            }
            (true, false) => (stored.first().map(|m| m.url.clone()), None),
            (false, true) => (None, Some(urls(&stored))),
            (false, false) => (None, None),
        };

        product.apply_update(input, image, designs);

        match self.repository.update(product).await {
            Ok(product) => self.resolve_one(product).await,
            Err(e) => {
                rollback(self.media.as_ref(), &stored).await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        self.repository.delete(id).await
    }

    /// Replace holiday and category ids with `{_id, name}` labels.
    ///
    /// Ids are looked up once per page; dangling references become `None`.
    pub async fn resolve_references(
        &self,
        products: Vec<Product>,
    ) -> ProductResult<Vec<ProductView>> {
        let holiday_ids = unique(products.iter().filter_map(|p| p.holiday));
        let category_ids = unique(products.iter().filter_map(|p| p.category));

        let holidays = if holiday_ids.is_empty() {
            HashMap::new()
        } else {
            by_id(self.labels.holidays(holiday_ids).await?)
        };
        let categories = if category_ids.is_empty() {
            HashMap::new()
        } else {
            by_id(self.labels.categories(category_ids).await?)
        };

        Ok(products
            .into_iter()
            .map(|product| {
                let holiday = product.holiday.and_then(|id| holidays.get(&id).cloned());
                let category = product.category.and_then(|id| categories.get(&id).cloned());
                ProductView::new(product, holiday, category)
            })
            .collect())
    }

    async fn resolve_one(&self, product: Product) -> ProductResult<ProductView> {
        let id = product.id;
        self.resolve_references(vec![product])
            .await?
            .pop()
            .ok_or(ProductError::NotFound(id))
    }

    async fn find(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    async fn upload(&self, files: &[MediaFile]) -> ProductResult<Vec<StoredMedia>> {
        Ok(upload_batch(
            self.media.as_ref(),
            files,
            &self.folder,
            self.upload_concurrency,
        )
        .await?)
    }
}

impl<R: ProductRepository, L: LabelLookup> Clone for ProductService<R, L> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            labels: Arc::clone(&self.labels),
            media: Arc::clone(&self.media),
            folder: self.folder.clone(),
            upload_concurrency: self.upload_concurrency,
        }
    }
}

fn check_design_count(designs: &[MediaFile]) -> ProductResult<()> {
    if designs.len() < MIN_DESIGN_IMAGES {
        return Err(ProductError::Validation(format!(
            "Se requieren mínimo {MIN_DESIGN_IMAGES} imágenes de diseño"
        )));
    }
    if designs.len() > MAX_DESIGN_IMAGES {
        return Err(ProductError::Validation(format!(
            "Se permiten máximo {MAX_DESIGN_IMAGES} imágenes de diseño"
        )));
    }
    Ok(())
}

fn check_content_types<'a>(mut files: impl Iterator<Item = &'a MediaFile>) -> ProductResult<()> {
    if files.any(|f| !f.content_type.starts_with("image/")) {
        return Err(ProductError::Validation(
            "Solo se permiten imágenes".to_string(),
        ));
    }
    Ok(())
}

/// First stored file is the primary image, the rest are designs
fn split_primary(stored: &[StoredMedia]) -> (String, Vec<String>) {
    match stored.split_first() {
        Some((primary, designs)) => (primary.url.clone(), urls(designs)),
        None => (String::new(), Vec::new()),
    }
}

fn urls(stored: &[StoredMedia]) -> Vec<String> {
    stored.iter().map(|m| m.url.clone()).collect()
}

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

fn by_id(labels: Vec<Label>) -> HashMap<Uuid, Label> {
    labels.into_iter().map(|l| (l.id, l)).collect()
}
