use serde::{Deserialize, Deserializer, Serialize};
use verne_authz::Availability;

/// Book record as returned by the catalog API.
///
/// Field names on the wire follow the catalog's column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Identifier assigned by the catalog
    #[serde(rename = "livre_id")]
    pub id: i64,
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "resume", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        rename = "annee_publication",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(rename = "editeur", default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "categorie_id", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "statut", default, deserialize_with = "status_or_unknown")]
    pub status: Availability,
}

fn status_or_unknown<'de, D>(deserializer: D) -> Result<Availability, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Availability>::deserialize(deserializer)?.unwrap_or_default())
}

impl Book {
    /// Case-insensitive substring match on title or author.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        needle.is_empty()
            || self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
    }
}

/// Payload for creating a book. The catalog assigns the identifier, so there
/// is no field for one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    #[serde(rename = "titre")]
    pub title: String,
    #[serde(rename = "auteur")]
    pub author: String,
    #[serde(rename = "resume", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        rename = "annee_publication",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(rename = "editeur", default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "categorie_id", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(rename = "statut", default)]
    pub status: Availability,
}
