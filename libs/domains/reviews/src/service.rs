use media::{rollback, upload_batch, MediaFile, MediaStore, StoredMedia};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{
    CreateReview, Review, ReviewFilter, ReviewStats, ReviewView, UpdateReview,
    MAX_QUALIFICATION, MAX_REVIEW_IMAGES, MIN_QUALIFICATION, MIN_REVIEW_IMAGES,
};
use crate::references::ReviewReferences;
use crate::repository::ReviewRepository;

const DEFAULT_FOLDER: &str = "bandoggie/reviews";
const DEFAULT_UPLOAD_CONCURRENCY: usize = 4;

pub struct ReviewService<R: ReviewRepository, F: ReviewReferences> {
    repository: Arc<R>,
    references: Arc<F>,
    media: Arc<dyn MediaStore>,
    folder: String,
    upload_concurrency: usize,
}

impl<R: ReviewRepository, F: ReviewReferences> ReviewService<R, F> {
    pub fn new(repository: R, references: F, media: Arc<dyn MediaStore>) -> Self {
        Self {
            repository: Arc::new(repository),
            references: Arc::new(references),
            media,
            folder: DEFAULT_FOLDER.to_string(),
            upload_concurrency: DEFAULT_UPLOAD_CONCURRENCY,
        }
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    pub fn with_upload_concurrency(mut self, concurrency: usize) -> Self {
        self.upload_concurrency = concurrency.max(1);
        self
    }

    #[instrument(skip(self))]
    pub async fn list_reviews(&self) -> ReviewResult<Vec<ReviewView>> {
        self.list(ReviewFilter::default()).await
    }

    #[instrument(skip(self))]
    pub async fn get_review(&self, id: Uuid) -> ReviewResult<ReviewView> {
        let review = self.find(id).await?;
        self.resolve_one(review).await
    }

    #[instrument(skip(self))]
    pub async fn reviews_by_product(&self, product: Uuid) -> ReviewResult<Vec<ReviewView>> {
        self.list(ReviewFilter {
            product: Some(product),
            ..Default::default()
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn reviews_by_client(&self, client: Uuid) -> ReviewResult<Vec<ReviewView>> {
        self.list(ReviewFilter {
            client: Some(client),
            ..Default::default()
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn reviews_by_qualification(
        &self,
        qualification: u8,
    ) -> ReviewResult<Vec<ReviewView>> {
        check_qualification(qualification)?;
        self.list(ReviewFilter {
            qualification: Some(qualification),
            ..Default::default()
        })
        .await
    }

    /// Validate, confirm both references exist, upload photos, then persist.
    #[instrument(skip(self, input, images), fields(product_id = %input.product, client_id = %input.client, images = images.len()))]
    pub async fn create_review(
        &self,
        input: CreateReview,
        images: Vec<MediaFile>,
    ) -> ReviewResult<ReviewView> {
        input.validate()?;
        check_images(&images)?;

        let client = self.references.clients(vec![input.client]).await?;
        if client.is_empty() {
            return Err(ReviewError::ClientNotFound(input.client));
        }
        let product = self.references.products(vec![input.product]).await?;
        if product.is_empty() {
            return Err(ReviewError::ProductNotFound(input.product));
        }

        let stored = upload_batch(
            self.media.as_ref(),
            &images,
            &self.folder,
            self.upload_concurrency,
        )
        .await?;
        let review = Review::new(input, stored.iter().map(|m| m.url.clone()).collect());

        let review = match self.repository.create(review).await {
            Ok(review) => review,
            Err(e) => {
                self.discard(&stored).await;
                return Err(e);
            }
        };

        tracing::info!(review_id = %review.id, "Review created");
        Ok(ReviewView::new(
            review,
            client.into_iter().next(),
            product.into_iter().next(),
        ))
    }

    #[instrument(skip(self, input))]
    pub async fn update_review(&self, id: Uuid, input: UpdateReview) -> ReviewResult<ReviewView> {
        input.validate()?;

        let mut review = self.find(id).await?;
        review.apply_update(input);

        let review = self.repository.update(review).await?;
        self.resolve_one(review).await
    }

    #[instrument(skip(self))]
    pub async fn delete_review(&self, id: Uuid) -> ReviewResult<()> {
        self.repository.delete(id).await
    }

    #[instrument(skip(self))]
    pub async fn product_stats(&self, product: Uuid) -> ReviewResult<ReviewStats> {
        let buckets = self.repository.rating_buckets(product).await?;
        Ok(ReviewStats::from_buckets(&buckets))
    }

    /// Newest first; reviews published at the same instant keep storage order
    async fn list(&self, filter: ReviewFilter) -> ReviewResult<Vec<ReviewView>> {
        let mut reviews = self.repository.list(filter).await?;
        reviews.sort_by_key(|r| Reverse(r.published_at));
        self.resolve_references(reviews).await
    }

    /// Resolve client and product references with one lookup each
    pub async fn resolve_references(&self, reviews: Vec<Review>) -> ReviewResult<Vec<ReviewView>> {
        if reviews.is_empty() {
            return Ok(Vec::new());
        }

        let client_ids = unique(reviews.iter().map(|r| r.client));
        let product_ids = unique(reviews.iter().map(|r| r.product));

        let clients: HashMap<_, _> = self
            .references
            .clients(client_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let products: HashMap<_, _> = self
            .references
            .products(product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(reviews
            .into_iter()
            .map(|review| {
                let client = clients.get(&review.client).cloned();
                let product = products.get(&review.product).cloned();
                ReviewView::new(review, client, product)
            })
            .collect())
    }

    async fn resolve_one(&self, review: Review) -> ReviewResult<ReviewView> {
        let id = review.id;
        self.resolve_references(vec![review])
            .await?
            .pop()
            .ok_or(ReviewError::NotFound(id))
    }

    async fn find(&self, id: Uuid) -> ReviewResult<Review> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ReviewError::NotFound(id))
    }

    async fn discard(&self, stored: &[StoredMedia]) {
        rollback(self.media.as_ref(), stored).await;
    }
}

impl<R: ReviewRepository, F: ReviewReferences> Clone for ReviewService<R, F> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            references: Arc::clone(&self.references),
            media: Arc::clone(&self.media),
            folder: self.folder.clone(),
            upload_concurrency: self.upload_concurrency,
        }
    }
}

pub fn check_qualification(qualification: u8) -> ReviewResult<()> {
    if !(MIN_QUALIFICATION..=MAX_QUALIFICATION).contains(&qualification) {
        return Err(ReviewError::Validation(
            "La calificación debe estar entre 1 y 5".to_string(),
        ));
    }
    Ok(())
}

/// No photos at all, or between 3 and 5 images
fn check_images(images: &[MediaFile]) -> ReviewResult<()> {
    if !images.is_empty() && !(MIN_REVIEW_IMAGES..=MAX_REVIEW_IMAGES).contains(&images.len()) {
        return Err(ReviewError::Validation(format!(
            "Se requieren entre {MIN_REVIEW_IMAGES} y {MAX_REVIEW_IMAGES} imágenes de diseño"
        )));
    }
    if images.iter().any(|f| !f.content_type.starts_with("image/")) {
        return Err(ReviewError::Validation(
            "Solo se permiten imágenes".to_string(),
        ));
    }
    Ok(())
}

fn unique(ids: impl Iterator<Item = Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClientRef, ProductRef};
    use crate::references::MockReviewReferences;
    use crate::repository::MockReviewRepository;
    use chrono::{Duration, Utc};
    use media::InMemoryMediaStore;

    fn client_ref(id: Uuid) -> ClientRef {
        ClientRef {
            id,
            name: "Lucía".to_string(),
            last_name: Some("Gómez".to_string()),
            email: None,
        }
    }

    fn product_ref(id: Uuid) -> ProductRef {
        ProductRef {
            id,
            name: "Collar".to_string(),
            price: 15.0,
            image: "https://cdn.test/collar.png".to_string(),
        }
    }

    fn known_references() -> MockReviewReferences {
        let mut refs = MockReviewReferences::new();
        refs.expect_clients()
            .returning(|ids| Ok(ids.into_iter().map(client_ref).collect()));
        refs.expect_products()
            .returning(|ids| Ok(ids.into_iter().map(product_ref).collect()));
        refs
    }

    fn input(qualification: u8) -> CreateReview {
        CreateReview {
            qualification,
            comment: "Le queda genial".to_string(),
            client: Uuid::now_v7(),
            product: Uuid::now_v7(),
            published_at: None,
        }
    }

    fn photos(n: usize) -> Vec<MediaFile> {
        (0..n)
            .map(|i| MediaFile::new(format!("p{i}.jpg"), "image/jpeg", vec![1, 2, 3]))
            .collect()
    }

    fn review_at(minutes_ago: i64, comment: &str) -> Review {
        let mut review = Review::new(
            CreateReview {
                comment: comment.to_string(),
                ..input(4)
            },
            Vec::new(),
        );
        review.published_at = Utc::now() - Duration::minutes(minutes_ago);
        review
    }

    fn service(
        repo: MockReviewRepository,
        refs: MockReviewReferences,
        store: &InMemoryMediaStore,
    ) -> ReviewService<MockReviewRepository, MockReviewReferences> {
        ReviewService::new(repo, refs, Arc::new(store.clone()))
    }

    #[tokio::test]
    async fn test_create_without_photos() {
        let mut repo = MockReviewRepository::new();
        repo.expect_create().returning(Ok);
        let store = InMemoryMediaStore::new();

        let view = service(repo, known_references(), &store)
            .create_review(input(5), Vec::new())
            .await
            .unwrap();

        assert!(view.design_images.is_empty());
        assert_eq!(view.client.unwrap().name, "Lucía");
        assert_eq!(view.product.unwrap().price, 15.0);
    }

    #[tokio::test]
    async fn test_two_photos_are_rejected_before_upload() {
        let mut repo = MockReviewRepository::new();
        repo.expect_create().never();
        let store = InMemoryMediaStore::new();

        let err = service(repo, MockReviewReferences::new(), &store)
            .create_review(input(5), photos(2))
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::Validation(_)));
        assert_eq!(store.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let mut refs = MockReviewReferences::new();
        refs.expect_clients()
            .returning(|ids| Ok(ids.into_iter().map(client_ref).collect()));
        refs.expect_products().returning(|_| Ok(Vec::new()));
        let store = InMemoryMediaStore::new();

        let err = service(MockReviewRepository::new(), refs, &store)
            .create_review(input(3), photos(3))
            .await
            .unwrap_err();

        assert!(matches!(err, ReviewError::ProductNotFound(_)));
        assert_eq!(store.stored_count().await, 0);
    }

    #[tokio::test]
    async fn test_database_failure_removes_photos() {
        let mut repo = MockReviewRepository::new();
        repo.expect_create()
            .returning(|_| Err(ReviewError::Database("timeout".to_string())));
        let store = InMemoryMediaStore::new();

        let result = service(repo, known_references(), &store)
            .create_review(input(4), photos(4))
            .await;

        assert!(matches!(result, Err(ReviewError::Database(_))));
        assert_eq!(store.stored_count().await, 0);
        assert_eq!(store.deleted_ids().await.len(), 4);
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_stable() {
        let older = review_at(60, "older");
        let tie_a = review_at(5, "tie-a");
        let mut tie_b = review_at(5, "tie-b");
        tie_b.published_at = tie_a.published_at;
        let newest = review_at(1, "newest");

        let stored = vec![older, tie_a, tie_b, newest];
        let mut repo = MockReviewRepository::new();
        repo.expect_list().returning(move |_| Ok(stored.clone()));
        let store = InMemoryMediaStore::new();

        let views = service(repo, known_references(), &store)
            .list_reviews()
            .await
            .unwrap();

        let comments: Vec<_> = views.iter().map(|v| v.comment.as_str()).collect();
        assert_eq!(comments, vec!["newest", "tie-a", "tie-b", "older"]);
    }

    #[tokio::test]
    async fn test_qualification_zero_is_rejected() {
        let mut repo = MockReviewRepository::new();
        repo.expect_list().never();
        let store = InMemoryMediaStore::new();

        let result = service(repo, MockReviewReferences::new(), &store)
            .reviews_by_qualification(0)
            .await;

        assert!(matches!(result, Err(ReviewError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_blank_comment_is_rejected() {
        let mut repo = MockReviewRepository::new();
        repo.expect_get_by_id().never();
        let store = InMemoryMediaStore::new();

        let result = service(repo, MockReviewReferences::new(), &store)
            .update_review(
                Uuid::now_v7(),
                UpdateReview {
                    comment: "   ".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ReviewError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_stats_fold_buckets() {
        let mut repo = MockReviewRepository::new();
        repo.expect_rating_buckets().returning(|_| {
            Ok(vec![
                crate::models::RatingBucket {
                    qualification: 5,
                    count: 2,
                },
                crate::models::RatingBucket {
                    qualification: 1,
                    count: 1,
                },
            ])
        });
        let store = InMemoryMediaStore::new();

        let stats = service(repo, MockReviewReferences::new(), &store)
            .product_stats(Uuid::now_v7())
            .await
            .unwrap();

        assert_eq!(stats.total_reviews, 3);
        assert_eq!(stats.average_rating, 3.67);
        assert_eq!(stats.rating_distribution.five, 2);
    }
}
