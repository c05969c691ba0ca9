use serde::{Deserialize, Serialize};

/// A suggested movie and how many votes it has collected.
///
/// Older backends name the fields `movieName` / `howManyVotes`; both spellings
/// are accepted on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    #[serde(rename = "movieTitle", alias = "movieName")]
    pub movie_title: String,
    #[serde(alias = "howManyVotes")]
    pub votes: u32,
}

impl Suggestion {
    /// The same suggestion with one more vote.
    pub fn with_vote(&self) -> Self {
        Self {
            votes: self.votes.saturating_add(1),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_legacy_vote_field_names() {
        let s: Suggestion =
            serde_json::from_str(r#"{"id":4,"movieName":"Alien","howManyVotes":7}"#).unwrap();
        assert_eq!(s.movie_title, "Alien");
        assert_eq!(s.votes, 7);
        assert_eq!(s.with_vote().votes, 8);
    }
}
