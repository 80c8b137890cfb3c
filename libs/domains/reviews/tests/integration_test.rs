//! Integration tests for the Reviews domain
//!
//! These run against a real MongoDB via testcontainers and cover the rating
//! stats aggregation, which the mocks cannot.

use domain_reviews::*;
use test_utils::{TestDataBuilder, TestMongo};
use uuid::Uuid;

fn review(product: Uuid, client: Uuid, qualification: u8) -> Review {
    Review::new(
        CreateReview {
            qualification,
            comment: format!("{qualification} estrellas"),
            client,
            product,
            published_at: None,
        },
        Vec::new(),
    )
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_rating_buckets_group_by_qualification() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(&mongo.database());
    let builder = TestDataBuilder::from_test_name("rating_buckets");
    let (bed, collar, ana) = (builder.id("bed"), builder.id("collar"), builder.id("ana"));

    for qualification in [5, 5, 4, 2] {
        repo.create(review(bed, ana, qualification)).await.unwrap();
    }
    repo.create(review(collar, ana, 1)).await.unwrap();

    let mut buckets = repo.rating_buckets(bed).await.unwrap();
    buckets.sort_by_key(|b| b.qualification);
    assert_eq!(
        buckets,
        vec![
            RatingBucket { qualification: 2, count: 1 },
            RatingBucket { qualification: 4, count: 1 },
            RatingBucket { qualification: 5, count: 2 },
        ]
    );

    let stats = ReviewStats::from_buckets(&buckets);
    assert_eq!(stats.total_reviews, 4);
    assert_eq!(stats.average_rating, 4.0);
    assert_eq!(stats.rating_distribution.five, 2);
    assert_eq!(stats.rating_distribution.one, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_rating_buckets_for_unreviewed_product_are_empty() {
    let mongo = TestMongo::new().await;
    let repo = MongoReviewRepository::new(&mongo.database());
    let builder = TestDataBuilder::from_test_name("rating_buckets_empty");

    repo.create(review(builder.id("bed"), builder.id("ana"), 3))
        .await
        .unwrap();

    let buckets = repo.rating_buckets(builder.id("leash")).await.unwrap();
    assert!(buckets.is_empty());
    assert_eq!(ReviewStats::from_buckets(&buckets), ReviewStats::default());
}
