use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Order;

impl ApiClient {
    pub async fn create_order(&self, order: &Order) -> ApiResult<Order> {
        self.send_json(Method::POST, "order", "orders", order).await
    }

    pub async fn orders_for_account(&self, account_id: i64) -> ApiResult<Vec<Order>> {
        let path = Self::with_query("orders/", &[("accountId", account_id)])?;
        self.get_list("orders", &path).await
    }
}
