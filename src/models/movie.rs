use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Path or URL of the poster image.
    #[serde(default)]
    pub poster: String,
    /// Minutes.
    pub runtime: u32,
    #[serde(rename = "mpaRating")]
    pub rating: String,
    pub year: i32,
}
