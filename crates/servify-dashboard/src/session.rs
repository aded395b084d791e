//! Per-session dashboard context.
//!
//! Each user session owns one [`DashboardSession`]; nothing here is shared
//! between sessions.

use serde::{Deserialize, Serialize};
use tracing::info;

use servify_core::error::CoreError;
use servify_core::filter::FilterModel;

use crate::gate::AuthGate;
use crate::service::{AggregationService, DashboardData};

pub const INVALID_LOGIN: &str = "Invalid email or password";
pub const INSIGHTS_NOTICE: &str =
    "Insights view coming soon! This will include advanced analytics and predictive features.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Sales,
    Insights,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    authenticated: bool,
    email: Option<String>,
    login_error: Option<String>,
    view: View,
    filter: FilterModel,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Login { error: Option<String> },
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub email: Option<String>,
    pub view: View,
    pub filter: FilterModel,
    #[serde(flatten)]
    pub data: DashboardData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn filter(&self) -> &FilterModel {
        &self.filter
    }

    pub async fn login(&mut self, gate: &AuthGate, email: &str, password: &str) -> bool {
        if gate.authenticate(email, password).await {
            info!(email, "User signed in");
            self.authenticated = true;
            self.email = Some(email.to_string());
            self.login_error = None;
            true
        } else {
            self.login_error = Some(INVALID_LOGIN.to_string());
            false
        }
    }

    /// Drop authentication along with the view and filter selections.
    pub fn logout(&mut self) {
        if let Some(email) = self.email.as_deref() {
            info!(email, "User signed out");
        }
        *self = Self::default();
    }

    pub fn select_view(&mut self, view: View) {
        self.view = view;
    }

    pub fn set_filter(&mut self, filter: FilterModel) {
        self.filter = filter;
    }

    pub fn reset_filters(&mut self) {
        self.filter = FilterModel::default();
    }

    /// Produce the screen for the current state. Unauthenticated sessions
    /// never touch the sales store.
    pub async fn render(&self, service: &AggregationService) -> Result<Screen, CoreError> {
        if !self.authenticated {
            return Ok(Screen::Login {
                error: self.login_error.clone(),
            });
        }

        let data = service.load(&self.filter).await?;
        Ok(Screen::Dashboard(DashboardView {
            email: self.email.clone(),
            view: self.view,
            filter: self.filter.clone(),
            data,
            notice: (self.view == View::Insights).then(|| INSIGHTS_NOTICE.to_string()),
        }))
    }
}
