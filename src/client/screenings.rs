use chrono::NaiveDate;
use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::Screening;

/// Filter accepted by `GET /screenings/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningFilter {
    MovieId(i64),
    Date(NaiveDate),
}

impl ApiClient {
    pub async fn list_screenings(&self) -> ApiResult<Vec<Screening>> {
        self.get_list("screenings", "screenings").await
    }

    pub async fn get_screening(&self, id: i64) -> ApiResult<Screening> {
        self.get_json(&format!("screening {}", id), &format!("screenings/{}", id))
            .await
    }

    pub async fn find_screenings(&self, filter: ScreeningFilter) -> ApiResult<Vec<Screening>> {
        let path = match filter {
            ScreeningFilter::MovieId(id) => Self::with_query("screenings/", &[("movieId", id)])?,
            ScreeningFilter::Date(date) => {
                Self::with_query("screenings/", &[("date", date.format("%Y-%m-%d").to_string())])?
            }
        };
        self.get_list("screenings", &path).await
    }

    /// The backend assigns the id; whatever `screening.id` holds is ignored.
    pub async fn create_screening(&self, screening: &Screening) -> ApiResult<Screening> {
        self.send_json(Method::POST, "screening", "screenings", screening)
            .await
    }

    pub async fn update_screening(&self, screening: &Screening) -> ApiResult<Screening> {
        self.send_json(
            Method::PUT,
            &format!("screening {}", screening.id),
            "screenings",
            screening,
        )
        .await
    }

    pub async fn delete_screening(&self, id: i64) -> ApiResult<()> {
        self.delete(&format!("screening {}", id), &format!("screenings/{}", id))
            .await
    }
}
