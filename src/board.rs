//! The activity board controller.
//!
//! `ActivityBoard` drives the three user-visible flows (refresh, signup,
//! unregister) against an [`ActivityApi`] and reports everything it wants the
//! page to show through a [`BoardView`]. Both collaborators are handed in once
//! at construction, so tests swap in fakes for the network and the page.

use std::cell::Cell;

use crate::api::{ActivityApi, ApiError};
use crate::catalog::ActivityCatalog;
use crate::status::StatusMessage;

pub const REJECTED_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

/// What the controller needs from the page.
pub trait BoardView {
    /// Replace every rendered card and selector option with this catalog.
    fn render_catalog(&self, catalog: ActivityCatalog);
    /// Replace the list area with the static load-failure notice.
    fn render_load_failure(&self);
    fn show_status(&self, message: StatusMessage);
    fn reset_form(&self);
    /// Blocking yes/no question to the user.
    fn confirm(&self, question: &str) -> bool;
}

pub struct ActivityBoard<A, V> {
    api: A,
    view: V,
    generation: Cell<u64>,
}

impl<A: ActivityApi, V: BoardView> ActivityBoard<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self { api, view, generation: Cell::new(0) }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Fetch the catalog and re-render. Only the most recently issued refresh
    /// is allowed to touch the view.
    pub async fn refresh(&self) {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let result = self.api.fetch_catalog().await;

        if generation != self.generation.get() {
            tracing::debug!(generation, latest = self.generation.get(), "dropping stale catalog response");
            return;
        }

        match result {
            Ok(catalog) => {
                tracing::debug!(generation, activities = catalog.len(), "catalog loaded");
                self.view.render_catalog(catalog);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load activities");
                self.view.render_load_failure();
            }
        }
    }

    pub async fn signup(&self, activity: &str, email: &str) {
        match self.api.signup(activity, email).await {
            Ok(message) => {
                tracing::info!(activity, email, "signed up");
                self.view.show_status(StatusMessage::success(message));
                self.view.reset_form();
                self.refresh().await;
            }
            Err(e) => self.report_failure(e, SIGNUP_FAILED),
        }
    }

    pub async fn remove_participant(&self, activity: &str, email: &str) {
        let question = format!("Unregister {email} from {activity}?");
        if !self.view.confirm(&question) {
            tracing::debug!(activity, email, "unregister declined");
            return;
        }

        match self.api.unregister(activity, email).await {
            Ok(message) => {
                tracing::info!(activity, email, "unregistered");
                self.view.show_status(StatusMessage::success(message));
                self.refresh().await;
            }
            Err(e) => self.report_failure(e, UNREGISTER_FAILED),
        }
    }

    fn report_failure(&self, error: ApiError, transport_fallback: &str) {
        let text = match error {
            ApiError::Rejected { status, detail } => {
                tracing::warn!(status, ?detail, "request rejected");
                detail.unwrap_or_else(|| REJECTED_FALLBACK.to_string())
            }
            other => {
                tracing::error!(error = %other, "request failed");
                transport_fallback.to_string()
            }
        };
        self.view.show_status(StatusMessage::error(text));
    }
}
