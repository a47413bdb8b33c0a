use std::sync::atomic::{AtomicBool, Ordering};

use shared::protocol::MealPlanResponse;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::{
    aggregator::{aggregate, RenderModel},
    error::{ClientError, PlanError},
    normalizer::normalize,
    preferences::PreferenceModel,
    MealPlanBackend,
};

/// A plan as returned by the service together with its render model.
#[derive(Debug, Clone)]
pub struct SubmittedPlan {
    pub plan: MealPlanResponse,
    pub view: RenderModel,
}

/// Owns the preferences for one planning session and gates submissions.
///
/// Only one `generate` call may be outstanding at a time. A second
/// [`PlannerSession::submit`] while one is pending fails with
/// [`PlanError::InFlight`] and leaves the pending call untouched.
pub struct PlannerSession<B: MealPlanBackend> {
    backend: B,
    preferences: PreferenceModel,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: MealPlanBackend> PlannerSession<B> {
    pub fn new(backend: B) -> Self {
        Self::with_preferences(backend, PreferenceModel::default())
    }

    pub fn with_preferences(backend: B, preferences: PreferenceModel) -> Self {
        Self {
            backend,
            preferences,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn preferences(&self) -> &PreferenceModel {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut PreferenceModel {
        &mut self.preferences
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn submit(&self, cancel: &CancellationToken) -> Result<SubmittedPlan, PlanError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("plan: submission rejected, previous request still in flight");
            return Err(PlanError::InFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let payload = normalize(&self.preferences).map_err(|err| {
            warn!(field = err.field(), "plan: preferences failed validation");
            err
        })?;

        info!("plan: submitting preferences");
        let plan = self.backend.generate(&payload, cancel).await?;
        if cancel.is_cancelled() {
            return Err(ClientError::Cancelled {
                endpoint: "/generate-meal-plan",
            }
            .into());
        }

        let view = aggregate(&plan);
        info!(
            days = view.days.len(),
            sections = view.grocery.sections.len(),
            "plan: received meal plan"
        );
        Ok(SubmittedPlan { plan, view })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
