use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(
        length(max = 100, message = "El nombre no puede superar 100 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Partial update; absent fields keep their value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCategory {
    #[validate(
        length(max = 100, message = "El nombre no puede superar 100 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

impl Category {
    pub fn new(input: CreateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateCategory) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(description) = update.description {
            let description = description.trim().to_string();
            // An empty description clears it
            self.description = (!description.is_empty()).then_some(description);
        }
        self.updated_at = Utc::now();
    }
}
