use async_trait::async_trait;
use shared::protocol::{MealPlanResponse, RequestPayload};
pub use tokio_util::sync::CancellationToken;

pub mod aggregator;
pub mod client;
pub mod error;
pub mod normalizer;
pub mod preferences;
pub mod session;
pub mod settings;

pub use aggregator::{aggregate, RenderModel};
pub use client::PlanServiceClient;
pub use error::{ClientError, PlanError, ServiceError, SettingsError, ValidationError};
pub use normalizer::normalize;
pub use preferences::{NutritionTargetsInput, PreferenceModel};
pub use session::{PlannerSession, SubmittedPlan};
pub use settings::{load_settings, ClientSettings};

/// Anything that can turn a request payload into a meal plan.
#[async_trait]
pub trait MealPlanBackend: Send + Sync {
    async fn generate(
        &self,
        payload: &RequestPayload,
        cancel: &CancellationToken,
    ) -> Result<MealPlanResponse, ClientError>;
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
