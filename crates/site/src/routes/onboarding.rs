//! Onboarding route handlers.
//!
//! New widget users answer a few setup questions. Answers are only logged.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::layout::Nav;
use crate::state::AppState;

/// Most answers we keep from one submission.
const MAX_ANSWERS: usize = 20;

/// A step in the onboarding sidebar.
pub struct OnboardingStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// Steps listed beside the questionnaire.
pub const STEPS: [OnboardingStep; 3] = [
    OnboardingStep {
        title: "Setup Your Workspace",
        description: "Configure your preferences and settings",
    },
    OnboardingStep {
        title: "Security Configuration",
        description: "Set up your security preferences",
    },
    OnboardingStep {
        title: "Team Integration",
        description: "Connect with your team and resources",
    },
];

/// Onboarding page template.
#[derive(Template, WebTemplate)]
#[template(path = "onboarding.html")]
pub struct OnboardingTemplate {
    pub nav: Nav,
    pub display_name: String,
    pub steps: &'static [OnboardingStep],
}

/// Display the onboarding questionnaire.
#[instrument(skip(state, record))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(record): RequireAuth,
) -> impl IntoResponse {
    OnboardingTemplate {
        nav: Nav::build(&state, Some(&record)),
        display_name: record.display_name,
        steps: &STEPS,
    }
}

/// Accept onboarding answers and send the visitor home.
#[instrument(skip(record, answers), fields(subject_id = %record.subject_id))]
pub async fn submit(
    RequireAuth(record): RequireAuth,
    Form(answers): Form<BTreeMap<String, String>>,
) -> impl IntoResponse {
    let answered: Vec<&str> = answers
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, _)| key.as_str())
        .take(MAX_ANSWERS)
        .collect();

    tracing::info!(
        answered = ?answered,
        count = answered.len(),
        "Onboarding completed"
    );

    Redirect::to("/")
}
