use serde::{Deserialize, Deserializer, Serialize};

/// One corporate announcement as served by the news backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub symbol: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub company: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub headline: String,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Announcement {
    pub fn new(symbol: &str, company: &str, headline: &str) -> Self {
        Self {
            id: None,
            source: String::new(),
            symbol: symbol.to_string(),
            company: company.to_string(),
            headline: headline.to_string(),
            impact: None,
            timestamp: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_impact(mut self, impact: &str) -> Self {
        self.impact = Some(impact.to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    /// Classification tag, ignoring blank values
    pub fn impact(&self) -> Option<&str> {
        self.impact.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Identity used when rendering this item at `index` of its snapshot.
    pub fn key(&self, index: usize) -> ItemKey {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => ItemKey::Identified(id.to_string()),
            _ => ItemKey::Positional(index),
        }
    }
}

/// Render identity of an item.
///
/// `Positional` keys are only meaningful within the snapshot they were
/// derived from; a later snapshot may hand the same index to another item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemKey {
    Identified(String),
    Positional(usize),
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemKey::Identified(id) => write!(f, "{}", id),
            ItemKey::Positional(index) => write!(f, "#{}", index),
        }
    }
}

/// Accepts a string or integer id; null and missing both mean "no id".
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct OptionalIdVisitor;

    impl<'de> Visitor<'de> for OptionalIdVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, an integer or null")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(OptionalIdVisitor)
        }
    }

    deserializer.deserialize_any(OptionalIdVisitor)
}

fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
