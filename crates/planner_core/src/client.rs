use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorBody,
    protocol::{Ingredient, MealPlanResponse, Recipe, RequestPayload, ServiceBanner},
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, ServiceError, SettingsError},
    settings::ClientSettings,
    MealPlanBackend,
};

const GENERATE_MEAL_PLAN: &str = "/generate-meal-plan";
const RECIPES: &str = "/recipes";
const INGREDIENTS: &str = "/ingredients";
const ROOT: &str = "/";

/// HTTP client for the meal planning service.
///
/// Holds no per-request state; clones share the connection pool and can be
/// used concurrently.
#[derive(Debug, Clone)]
pub struct PlanServiceClient {
    http: Client,
    base_url: String,
}

impl PlanServiceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(Client::new(), base_url)
    }

    pub fn with_http_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, SettingsError> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_http_client(
            builder.build()?,
            settings.api_base_url.clone(),
        ))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate_meal_plan(
        &self,
        payload: &RequestPayload,
    ) -> Result<MealPlanResponse, ClientError> {
        self.generate_meal_plan_with_cancel(payload, &CancellationToken::new())
            .await
    }

    pub async fn generate_meal_plan_with_cancel(
        &self,
        payload: &RequestPayload,
        cancel: &CancellationToken,
    ) -> Result<MealPlanResponse, ClientError> {
        let request = self.http.post(self.url(GENERATE_MEAL_PLAN)).json(payload);
        self.execute(GENERATE_MEAL_PLAN, request, cancel).await
    }

    pub async fn get_recipes(&self) -> Result<Vec<Recipe>, ClientError> {
        self.get_recipes_with_cancel(&CancellationToken::new()).await
    }

    pub async fn get_recipes_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Recipe>, ClientError> {
        self.execute(RECIPES, self.http.get(self.url(RECIPES)), cancel)
            .await
    }

    pub async fn get_ingredients(&self) -> Result<Vec<Ingredient>, ClientError> {
        self.get_ingredients_with_cancel(&CancellationToken::new())
            .await
    }

    pub async fn get_ingredients_with_cancel(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Ingredient>, ClientError> {
        self.execute(INGREDIENTS, self.http.get(self.url(INGREDIENTS)), cancel)
            .await
    }

    /// `GET /`, useful to check the configured URL points at the service.
    pub async fn health(&self) -> Result<ServiceBanner, ClientError> {
        self.execute(
            ROOT,
            self.http.get(self.url(ROOT)),
            &CancellationToken::new(),
        )
        .await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<T, ClientError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(endpoint, "plan service: request cancelled");
                Err(ClientError::Cancelled { endpoint })
            }
            result = round_trip(endpoint, request) => result,
        }
    }
}

async fn round_trip<T: DeserializeOwned>(
    endpoint: &'static str,
    request: RequestBuilder,
) -> Result<T, ClientError> {
    let transport = |source: reqwest::Error| ClientError::Transport { endpoint, source };

    debug!(endpoint, "plan service: sending request");
    let response = request.send().await.map_err(|err| {
        warn!(endpoint, error = %err, "plan service: no response");
        transport(err)
    })?;
    let status = response.status();

    if !status.is_success() {
        // A status line arrived, so an unreadable body only costs the detail.
        let detail = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.detail_message()),
            Err(err) => {
                debug!(endpoint, error = %err, "plan service: error body unreadable");
                None
            }
        };
        warn!(
            endpoint,
            status = status.as_u16(),
            has_detail = detail.is_some(),
            "plan service: error status"
        );
        return Err(ClientError::Service {
            endpoint,
            error: ServiceError::new(status.as_u16(), detail),
        });
    }

    let body = response.bytes().await.map_err(transport)?;
    info!(endpoint, status = status.as_u16(), "plan service: ok");
    serde_json::from_slice(&body).map_err(|source| {
        warn!(endpoint, "plan service: malformed response body");
        ClientError::Parse { endpoint, source }
    })
}

#[async_trait]
impl MealPlanBackend for PlanServiceClient {
    async fn generate(
        &self,
        payload: &RequestPayload,
        cancel: &CancellationToken,
    ) -> Result<MealPlanResponse, ClientError> {
        self.generate_meal_plan_with_cancel(payload, cancel).await
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod tests;
