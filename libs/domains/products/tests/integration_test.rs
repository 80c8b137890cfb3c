//! Integration tests for the Products domain
//!
//! These run against a real MongoDB via testcontainers with the in-memory
//! media store standing in for the image host.

use domain_holidays::{CreateHoliday, HolidayRepository, MongoHolidayRepository};
use domain_products::*;
use media::{InMemoryMediaStore, MediaFile};
use std::sync::Arc;
use test_utils::{assertions::*, png_bytes, TestDataBuilder, TestMongo};

fn png(name: &str) -> MediaFile {
    MediaFile::new(name, "image/png", png_bytes())
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_create_then_get_returns_submitted_product() {
    let mongo = TestMongo::new().await;
    let db = mongo.database();
    let builder = TestDataBuilder::from_test_name("create_then_get_product");

    let holiday = MongoHolidayRepository::new(&db)
        .create(CreateHoliday {
            name: "Navidad".to_string(),
        })
        .await
        .unwrap();

    let repo = MongoProductRepository::new(&db);
    repo.init_indexes().await.unwrap();
    let store = InMemoryMediaStore::new();
    let service = ProductService::new(repo, MongoLabelLookup::new(&db), Arc::new(store.clone()));

    let name = builder.name("Suéter", "rojo");
    let created = service
        .create_product(
            CreateProduct {
                name: name.clone(),
                price: 18.75,
                description: "Lana para perros pequeños".to_string(),
                holiday: Some(holiday.id),
                category: Some(builder.id("dangling-category")),
            },
            ProductImages {
                image: Some(png("front.png")),
                design_images: (0..3).map(|i| png(&format!("d{i}.png"))).collect(),
            },
        )
        .await
        .unwrap();

    let found = service.get_product(created.id).await.unwrap();
    assert_uuid_eq(found.id, created.id, "product id");
    assert_eq!(found.name, name);
    assert_eq!(found.price, 18.75);
    assert_eq!(found.description, "Lana para perros pequeños");
    assert_eq!(found.holiday.map(|h| h.name).as_deref(), Some("Navidad"));
    assert!(found.category.is_none());

    assert!(found.image.ends_with("-front.png"));
    assert_eq!(found.design_images.len(), 3);
    for (i, url) in found.design_images.iter().enumerate() {
        assert!(url.ends_with(&format!("-d{i}.png")), "design {i}: {url}");
    }

    let mut stored: Vec<String> = store
        .stored_ids()
        .await
        .into_iter()
        .map(|id| format!("memory://{id}"))
        .collect();
    let mut referenced: Vec<String> = std::iter::once(found.image.clone())
        .chain(found.design_images.clone())
        .collect();
    stored.sort();
    referenced.sort();
    assert_eq!(referenced, stored);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_missing_product_is_not_found() {
    let mongo = TestMongo::new().await;
    let repo = MongoProductRepository::new(&mongo.database());
    let builder = TestDataBuilder::from_test_name("delete_missing_product");

    let result = repo.delete(builder.id("ghost")).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}
