use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One recommendable item as returned by the recommendation API, before
/// display normalization. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawEntity {
    #[serde(default, alias = "entity_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub properties: EntityProperties,
    /// Source name (`imdb`, `goodreads`, `where_to_watch`, ...) to its records,
    /// in the order the API sent them
    #[serde(default)]
    pub external: Map<String, Value>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub action: Option<Value>,
    /// Short rationale for why the entity was recommended
    #[serde(default)]
    pub context: Option<String>,
}

/// Nested `properties` block of a [`RawEntity`]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EntityProperties {
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub content_rating: Option<Value>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub publication_date: Option<String>,
    #[serde(default)]
    pub publisher: Option<Value>,
    #[serde(default)]
    pub page_count: Option<Value>,
    /// Usually an HTML string, but kept untyped so odd payloads pass through
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub image: Option<Value>,
    #[serde(default)]
    pub disambiguation: Option<String>,
    #[serde(default)]
    pub address: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub website: Option<Value>,
    #[serde(default)]
    pub business_rating: Option<Value>,
}

/// Labeled attribute attached to an entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl RawEntity {
    /// Checks whether any of the entity's tags carries the given id
    pub fn has_tag(&self, tag_id: &str) -> bool {
        self.tags.iter().any(|tag| tag.id == tag_id)
    }

    /// First record of an external source, if the source holds a non-empty list
    pub fn first_external(&self, source: &str) -> Option<&Value> {
        match self.external.get(source)? {
            Value::Array(records) => records.first(),
            other => Some(other),
        }
    }
}

/// Accepts ids sent either as JSON strings or numbers; null becomes empty
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_sparse_entity() {
        let entity: RawEntity = serde_json::from_value(json!({ "name": "Heat" })).unwrap();
        assert_eq!(entity.name, "Heat");
        assert!(entity.id.is_empty());
        assert!(entity.properties.description.is_none());
        assert!(entity.tags.is_empty());
    }

    #[test]
    fn test_entity_id_alias_and_numeric_ids() {
        let entity: RawEntity = serde_json::from_value(json!({
            "entity_id": 42,
            "tags": [{ "id": 7, "name": "Drama", "type": "genre" }]
        }))
        .unwrap();
        assert_eq!(entity.id, "42");
        assert_eq!(entity.tags[0].id, "7");
        assert_eq!(entity.tags[0].kind, "genre");
        assert!(entity.has_tag("7"));
        assert!(!entity.has_tag("8"));
    }

    #[test]
    fn test_external_keeps_source_order() {
        let entity: RawEntity = serde_json::from_value(json!({
            "external": {
                "where_to_watch": [{ "name": "Netflix" }],
                "imdb": [{ "id": "tt0113277" }, { "id": "tt9999999" }]
            }
        }))
        .unwrap();
        let sources: Vec<&String> = entity.external.keys().collect();
        assert_eq!(sources, vec!["where_to_watch", "imdb"]);
        assert_eq!(entity.first_external("imdb"), Some(&json!({ "id": "tt0113277" })));
        assert_eq!(entity.first_external("goodreads"), None);
    }
}
