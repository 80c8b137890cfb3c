use chrono::{DateTime, Utc};
use database::mongodb::uuid_as_string;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Holiday entity - a display label products can be classified under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id", with = "uuid_as_string")]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a holiday
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateHoliday {
    #[validate(
        length(max = 100, message = "El nombre no puede superar 100 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
}

/// DTO for renaming a holiday
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateHoliday {
    #[validate(
        length(max = 100, message = "El nombre no puede superar 100 caracteres"),
        custom(
            function = "axum_helpers::validation::not_blank",
            message = "El nombre es obligatorio"
        )
    )]
    pub name: String,
}

impl Holiday {
    pub fn new(input: CreateHoliday) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateHoliday) {
        self.name = update.name.trim().to_string();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_id_as_string_under_underscore_id() {
        let holiday = Holiday::new(CreateHoliday {
            name: " Navidad ".to_string(),
        });
        let json = serde_json::to_value(&holiday).unwrap();

        assert_eq!(json["_id"], holiday.id.to_string());
        assert_eq!(json["name"], "Navidad");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let input = CreateHoliday {
            name: "   ".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_apply_update_touches_timestamp() {
        let mut holiday = Holiday::new(CreateHoliday {
            name: "Navidad".to_string(),
        });
        let created = holiday.updated_at;

        holiday.apply_update(UpdateHoliday {
            name: "Halloween".to_string(),
        });

        assert_eq!(holiday.name, "Halloween");
        assert!(holiday.updated_at >= created);
    }
}
