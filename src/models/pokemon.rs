// Pokemon record as handed over by the data-fetching layer
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// A fetched (or user-created) entity record.
///
/// Ids arrive as numbers from the API and as strings from forms, so both
/// shapes are accepted and kept as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    #[serde(default, deserialize_with = "de::optional_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PokemonRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<RawId>::deserialize(deserializer)?.map(|raw| match raw {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }))
    }
}
