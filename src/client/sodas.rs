use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Soda;

impl ApiClient {
    pub async fn list_sodas(&self) -> ApiResult<Vec<Soda>> {
        self.get_list("sodas", "sodas").await
    }
}
