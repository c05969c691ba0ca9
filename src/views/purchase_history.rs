use std::collections::HashMap;
use std::fmt;

use crate::models::{Order, Screening};
use crate::views::ViewError;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseEntry {
    pub order: Order,
    /// `None` when the screening has since been deleted.
    pub screening: Option<Screening>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseHistory {
    /// Most recent first.
    pub entries: Vec<PurchaseEntry>,
}

impl fmt::Display for PurchaseHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            write!(f, "No orders found")
        } else {
            write!(f, "Displaying {} orders", self.entries.len())
        }
    }
}

/// Orders of the signed-in account, newest first, each with its screening.
pub async fn load(state: &AppState) -> Result<PurchaseHistory, ViewError> {
    let account_id = state.session.account.account_id().ok_or(ViewError::NotLoggedIn)?;

    let mut orders = state
        .navigator
        .track(state.client.orders_for_account(account_id))
        .await?;
    if orders.is_empty() {
        return Ok(PurchaseHistory::default());
    }
    // higher id = more recent
    orders.sort_by(|a, b| b.id.cmp(&a.id));

    // один запрос на все сеансы вместо запроса на каждый заказ
    let screenings: HashMap<i64, Screening> = state
        .navigator
        .track(state.client.list_screenings())
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let entries = orders
        .into_iter()
        .map(|order| PurchaseEntry {
            screening: screenings.get(&order.screening_id).cloned(),
            order,
        })
        .collect();

    Ok(PurchaseHistory { entries })
}
