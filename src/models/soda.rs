use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Soda {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub poster: String,
}
