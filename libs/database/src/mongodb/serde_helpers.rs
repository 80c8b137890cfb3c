//! Serde adapters that keep `Uuid` values as plain strings in BSON.
//!
//! The BSON serializer would otherwise emit binary subtype 0, which makes
//! `{ "_id": id.to_string() }` filters miss. Use with `#[serde(with = ...)]`.

/// `Uuid` <-> string
pub mod uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(value: &Uuid, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Uuid, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Uuid::parse_str(&raw).map_err(serde::de::Error::custom)
    }
}

/// `Option<Uuid>` <-> string or null
pub mod option_uuid_as_string {
    use serde::{Deserialize, Deserializer, Serializer};
    use uuid::Uuid;

    pub fn serialize<S: Serializer>(value: &Option<Uuid>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(id) => serializer.serialize_some(&id.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Uuid>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => Uuid::parse_str(&raw)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        #[serde(rename = "_id", with = "super::uuid_as_string")]
        id: Uuid,
        #[serde(default, with = "super::option_uuid_as_string")]
        parent: Option<Uuid>,
    }

    #[test]
    fn test_uuid_serializes_as_bson_string() {
        let id = Uuid::now_v7();
        let doc = mongodb::bson::to_document(&Doc { id, parent: None }).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), id.to_string());
        assert!(matches!(doc.get("parent"), Some(mongodb::bson::Bson::Null)));
    }

    #[test]
    fn test_missing_optional_reads_as_none() {
        let id = Uuid::now_v7();
        let json = format!(r#"{{"_id":"{id}"}}"#);
        let parsed: Doc = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Doc { id, parent: None });
    }

    #[test]
    fn test_rejects_malformed_uuid() {
        let result: Result<Doc, _> = serde_json::from_str(r#"{"_id":"not-a-uuid"}"#);
        assert!(result.is_err());
    }
}
