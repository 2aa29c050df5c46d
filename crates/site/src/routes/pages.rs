//! Content page route handlers.
//!
//! Serves the markdown-backed pages: about, advisory services, the managed
//! service pages and the project case studies.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::get,
};
use tracing::instrument;

use crate::content::{Page, Section};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::layout::{Nav, NavLink};
use crate::state::AppState;

/// Content page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/content.html")]
pub struct ContentPageTemplate {
    pub nav: Nav,
    /// Eyebrow above the title ("Services", "Projects"), empty for plain pages.
    pub eyebrow: &'static str,
    pub title: String,
    pub description: String,
    pub highlights: Vec<String>,
    pub content_html: String,
    /// Sibling pages in the same section.
    pub related: Vec<NavLink>,
}

fn render_page(
    state: &AppState,
    nav: Nav,
    section: Section,
    slug: &str,
) -> Result<ContentPageTemplate> {
    let page: &Page = state
        .content()
        .get_page(section, slug)
        .ok_or_else(|| AppError::NotFound(format!("page {slug}")))?;

    let (eyebrow, prefix) = match section {
        Section::Pages => ("", None),
        Section::Services => ("Services", Some("services")),
        Section::Projects => ("Projects", Some("projects")),
    };

    let related = prefix.map_or_else(Vec::new, |prefix| {
        state
            .content()
            .section(section)
            .iter()
            .filter(|p| p.slug != slug)
            .map(|p| NavLink {
                href: format!("/{prefix}/{}", p.slug),
                label: p.meta.title.clone(),
            })
            .collect()
    });

    Ok(ContentPageTemplate {
        nav,
        eyebrow,
        title: page.meta.title.clone(),
        description: page.meta.description.clone().unwrap_or_default(),
        highlights: page.meta.highlights.clone(),
        content_html: page.content_html.clone(),
        related,
    })
}

/// Display the About page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, session))]
pub async fn about(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse> {
    let nav = Nav::build(&state, session.as_ref());
    render_page(&state, nav, Section::Pages, "about")
}

/// Display the Advisory Services page.
///
/// # Errors
///
/// Returns 404 if the page doesn't exist.
#[instrument(skip(state, session))]
pub async fn advisory_services(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse> {
    let nav = Nav::build(&state, session.as_ref());
    render_page(&state, nav, Section::Pages, "advisory-services")
}

/// Display a managed service page.
///
/// # Errors
///
/// Returns 404 for an unknown service.
#[instrument(skip(state, session))]
pub async fn service(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse> {
    let nav = Nav::build(&state, session.as_ref());
    render_page(&state, nav, Section::Services, &slug)
}

/// Display a project case study.
///
/// # Errors
///
/// Returns 404 for an unknown project.
#[instrument(skip(state, session))]
pub async fn project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse> {
    let nav = Nav::build(&state, session.as_ref());
    render_page(&state, nav, Section::Projects, &slug)
}

/// Create the pages routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/about", get(about))
        .route("/advisory-services", get(advisory_services))
        .route("/services/{slug}", get(service))
        .route("/projects/{slug}", get(project))
}
