//! HTTP implementation of [`ScheduleApi`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};

use super::{ApiError, ScheduleApi};
use crate::config::ApiConfig;
use crate::model::{NewSchedule, Schedule};

/// Client for the Kronos REST API.
pub struct HttpScheduleApi {
    client: Client,
    base_url: String,
}

impl HttpScheduleApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), Duration::from_secs(config.request_timeout_secs))
    }

    /// Absolute URL for an API path such as `schedules/42/pause`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: body.trim().to_string(),
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| ApiError::InvalidData(e.to_string()))
    }

    async fn post_lifecycle(&self, id: &str, verb: &str) -> Result<Schedule, ApiError> {
        let url = self.url(&format!("schedules/{}/{}", id, verb));
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }
}

#[async_trait]
impl ScheduleApi for HttpScheduleApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_schedules(&self) -> Result<Vec<Schedule>, ApiError> {
        let url = self.url("schedules");
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        // the server encodes an empty store as `null`
        let schedules: Option<Vec<Schedule>> = Self::decode(Self::check(response).await?).await?;
        Ok(schedules.unwrap_or_default())
    }

    async fn get_schedule(&self, id: &str) -> Result<Schedule, ApiError> {
        let url = self.url(&format!("schedules/{}", id));
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.to_string()));
        }
        Self::decode(Self::check(response).await?).await
    }

    async fn create_schedule(&self, schedule: &NewSchedule) -> Result<Schedule, ApiError> {
        let url = self.url("schedules");
        log::debug!("POST {} ({})", url, schedule.title);

        let response = self
            .client
            .post(&url)
            .json(schedule)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::decode(Self::check(response).await?).await
    }

    async fn delete_schedule(&self, id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("schedules/{}", id));
        log::debug!("DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::check(response).await?;
        Ok(())
    }

    async fn pause_schedule(&self, id: &str) -> Result<Schedule, ApiError> {
        self.post_lifecycle(id, "pause").await
    }

    async fn resume_schedule(&self, id: &str) -> Result<Schedule, ApiError> {
        self.post_lifecycle(id, "resume").await
    }

    async fn trigger_schedule(&self, id: &str) -> Result<Schedule, ApiError> {
        self.post_lifecycle(id, "trigger").await
    }
}
