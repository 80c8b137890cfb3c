use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Client entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub last_name: String,
    /// Lowercased, unique across clients
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClient {
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El apellido es obligatorio"
        )
    )]
    pub last_name: String,
    #[validate(email(message = "El email no es válido"))]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClient {
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: Option<String>,
    #[validate(
        length(max = 100),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El apellido es obligatorio"
        )
    )]
    pub last_name: Option<String>,
    #[validate(email(message = "El email no es válido"))]
    pub email: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
}

/// Emails compare case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Client {
    pub fn new(input: CreateClient) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            last_name: input.last_name.trim().to_string(),
            email: normalize_email(&input.email),
            phone: non_empty(input.phone),
            address: non_empty(input.address),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateClient) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            self.last_name = last_name.trim().to_string();
        }
        if let Some(email) = update.email {
            self.email = normalize_email(&email);
        }
        if update.phone.is_some() {
            self.phone = non_empty(update.phone);
        }
        if update.address.is_some() {
            self.address = non_empty(update.address);
        }
        self.updated_at = Utc::now();
    }
}
