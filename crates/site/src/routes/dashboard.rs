//! Client dashboard.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::SessionRecord;
use crate::routes::admin::{ADMIN_PANELS, AdminPanelLink};
use crate::routes::layout::Nav;
use crate::state::AppState;

/// A dashboard metric tile.
pub struct DashboardStat {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
}

/// Metric tiles. Sample figures until tenant reporting is wired in.
pub const DASHBOARD_STATS: [DashboardStat; 4] = [
    DashboardStat {
        title: "Devices Managed",
        value: "1,234",
        change: "+12%",
    },
    DashboardStat {
        title: "Active Users",
        value: "856",
        change: "+8%",
    },
    DashboardStat {
        title: "Policies Active",
        value: "42",
        change: "+3%",
    },
    DashboardStat {
        title: "Compliance Rate",
        value: "98.5%",
        change: "+2%",
    },
];

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub nav: Nav,
    pub record: SessionRecord,
    /// Admin job title, looked up from the account list.
    pub title: Option<String>,
    pub banner: String,
    pub stats: &'static [DashboardStat],
    /// Admin panel links; empty for non-admins.
    pub admin_panels: &'static [AdminPanelLink],
}

/// Display the dashboard.
#[instrument(skip(state, record), fields(subject_id = %record.subject_id))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(record): RequireAuth,
) -> impl IntoResponse {
    let title = match (&record.title, &record.email) {
        (Some(title), _) => Some(title.clone()),
        (None, Some(email)) if record.is_admin() => state
            .admins()
            .iter()
            .find(|a| a.email.matches(email))
            .and_then(|a| a.title.clone()),
        _ => None,
    };

    let admin_panels: &'static [AdminPanelLink] = if record.is_admin() {
        &ADMIN_PANELS
    } else {
        &[]
    };

    DashboardTemplate {
        nav: Nav::build(&state, Some(&record)),
        banner: record.banner_label(),
        title,
        record,
        stats: &DASHBOARD_STATS,
        admin_panels,
    }
}
