//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::content::Section;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::blog::PostView;
use crate::routes::layout::Nav;
use crate::state::AppState;

/// Number of service cards on the home page.
const FEATURED_SERVICES: usize = 4;

/// Number of blog teasers on the home page.
const RECENT_POSTS_COUNT: usize = 3;

/// A headline number in the stats band.
pub struct Stat {
    pub number: &'static str,
    pub label: &'static str,
}

/// Stats band shown under the hero.
pub const STATS: [Stat; 4] = [
    Stat {
        number: "500+",
        label: "Devices Managed",
    },
    Stat {
        number: "99.9%",
        label: "Uptime Guarantee",
    },
    Stat {
        number: "50+",
        label: "Happy Clients",
    },
    Stat {
        number: "24/7",
        label: "Support Available",
    },
];

/// "Why choose us" bullet points.
pub const BENEFITS: [&str; 6] = [
    "Expert Microsoft Intune specialists",
    "Proactive monitoring and management",
    "Rapid deployment and migration",
    "Comprehensive security solutions",
    "24/7 technical support",
    "Cost-effective managed services",
];

/// Service teaser card.
pub struct ServiceCard {
    pub href: String,
    pub title: String,
    pub description: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: Nav,
    pub services: Vec<ServiceCard>,
    pub stats: &'static [Stat],
    pub benefits: &'static [&'static str],
    pub recent_posts: Vec<PostView>,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
) -> impl IntoResponse {
    let services = state
        .content()
        .section(Section::Services)
        .iter()
        .take(FEATURED_SERVICES)
        .map(|page| ServiceCard {
            href: format!("/services/{}", page.slug),
            title: page.meta.title.clone(),
            description: page.meta.description.clone().unwrap_or_default(),
        })
        .collect();

    let recent_posts = state
        .content()
        .get_recent_posts(RECENT_POSTS_COUNT, None)
        .into_iter()
        .map(PostView::from)
        .collect();

    HomeTemplate {
        nav: Nav::build(&state, session.as_ref()),
        services,
        stats: &STATS,
        benefits: &BENEFITS,
        recent_posts,
    }
}
