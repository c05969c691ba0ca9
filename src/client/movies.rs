use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Movie;

impl ApiClient {
    pub async fn list_movies(&self) -> ApiResult<Vec<Movie>> {
        self.get_list("movies", "movies").await
    }

    pub async fn get_movie(&self, id: i64) -> ApiResult<Movie> {
        self.get_json(&format!("movie {}", id), &format!("movies/{}", id)).await
    }

    /// Movies whose title contains `title`.
    pub async fn search_movies(&self, title: &str) -> ApiResult<Vec<Movie>> {
        let path = Self::with_query("movies/", &[("title", title)])?;
        self.get_list("movies", &path).await
    }
}
