//! Reviews API routes

use axum::Router;
use domain_reviews::{handlers, MongoReviewReferences, MongoReviewRepository, ReviewService};

use crate::state::AppState;

pub fn router(state: &AppState) -> Router {
    let repository = MongoReviewRepository::new(&state.db);
    let references = MongoReviewReferences::new(&state.db);
    let service = ReviewService::new(repository, references, state.media.clone())
        .with_folder(state.config.media.folder_for("reviews"))
        .with_upload_concurrency(state.config.media.upload_concurrency);
    handlers::router(service)
}

pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoReviewRepository::new(&state.db).init_indexes().await?;
    Ok(())
}
