use reqwest::Method;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Suggestion;

#[derive(Debug, Serialize)]
struct NewSuggestion<'a> {
    id: i64,
    #[serde(rename = "movieTitle")]
    movie_title: &'a str,
    votes: u32,
}

impl ApiClient {
    pub async fn list_suggestions(&self) -> ApiResult<Vec<Suggestion>> {
        self.get_list("suggestions", &self.suggestions_resource).await
    }

    pub async fn get_suggestion(&self, id: i64) -> ApiResult<Suggestion> {
        let path = format!("{}/{}", self.suggestions_resource, id);
        self.get_json(&format!("suggestion {}", id), &path).await
    }

    /// Creates a suggestion carrying its first vote. A title that is already
    /// on the list comes back as `ApiError::Conflict`.
    pub async fn create_suggestion(&self, movie_title: &str) -> ApiResult<Suggestion> {
        let body = NewSuggestion { id: 0, movie_title, votes: 1 };
        self.send_json(
            Method::POST,
            &format!("suggestion \"{}\"", movie_title),
            &self.suggestions_resource,
            &body,
        )
        .await
    }

    pub async fn update_suggestion(&self, suggestion: &Suggestion) -> ApiResult<Suggestion> {
        self.send_json(
            Method::PUT,
            &format!("suggestion {}", suggestion.id),
            &self.suggestions_resource,
            suggestion,
        )
        .await
    }

    pub async fn delete_suggestion(&self, id: i64) -> ApiResult<()> {
        let path = format!("{}/{}", self.suggestions_resource, id);
        self.delete(&format!("suggestion {}", id), &path).await
    }
}
