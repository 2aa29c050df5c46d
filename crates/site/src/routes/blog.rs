//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::instrument;

use crate::content::{Category, Post};
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::layout::Nav;
use crate::state::AppState;

/// Post view for templates.
#[derive(Clone)]
pub struct PostView {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub author: Option<String>,
    /// Publication date as shown to readers, e.g. `May 15, 2024`.
    pub published_on: String,
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub category_slug: Option<String>,
    pub tags: Vec<String>,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            slug: post.slug.clone(),
            title: post.meta.title.clone(),
            description: post.meta.description.clone(),
            author: post.meta.author.clone(),
            published_on: post.meta.published_at.format("%B %-d, %Y").to_string(),
            featured_image: post.meta.featured_image.clone(),
            category: post.meta.category.clone(),
            category_slug: post.category_slug(),
            tags: post.meta.tags.clone(),
            content_html: post.content_html.clone(),
            reading_time_minutes: post.reading_time_minutes,
        }
    }
}

/// Blog index page template (also used for category listings).
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub nav: Nav,
    /// Heading; the category name on category pages.
    pub heading: String,
    pub posts: Vec<PostView>,
    pub categories: Vec<Category>,
    pub tags: Vec<String>,
    /// Slug of the category being shown, if any.
    pub active_category: Option<String>,
}

/// Blog post detail template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub nav: Nav,
    pub post: PostView,
    pub recent_posts: Vec<PostView>,
    /// Base URL for canonical links.
    pub base_url: String,
    pub share_links: Vec<ShareLink>,
}

/// A social share button.
pub struct ShareLink {
    pub network: &'static str,
    pub href: String,
}

/// Share buttons for a post.
fn share_links(post_url: &str, title: &str) -> Vec<ShareLink> {
    let url = urlencoding::encode(post_url);
    vec![
        ShareLink {
            network: "LinkedIn",
            href: format!("https://www.linkedin.com/sharing/share-offsite/?url={url}"),
        },
        ShareLink {
            network: "Twitter",
            href: format!(
                "https://twitter.com/intent/tweet?url={url}&text={}",
                urlencoding::encode(title)
            ),
        },
        ShareLink {
            network: "Email",
            href: format!(
                "mailto:?subject={}&body={url}",
                urlencoding::encode(title)
            ),
        },
    ]
}

/// Number of recent posts to show in sidebar.
const RECENT_POSTS_COUNT: usize = 3;

/// Display the blog index page with all published posts.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(session): OptionalAuth,
) -> impl IntoResponse {
    let posts: Vec<PostView> = state
        .content()
        .get_published_posts()
        .map(PostView::from)
        .collect();

    BlogIndexTemplate {
        nav: Nav::build(&state, session.as_ref()),
        heading: "Blog & Insights".to_string(),
        posts,
        categories: state.content().get_categories(),
        tags: state.content().get_all_tags(),
        active_category: None,
    }
}

/// Display published posts in one category.
///
/// # Errors
///
/// Returns 404 if no published post uses the category.
#[instrument(skip(state, session))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse, StatusCode> {
    let categories = state.content().get_categories();
    let name = categories
        .iter()
        .find(|c| c.slug == slug)
        .map(|c| c.name.clone())
        .ok_or(StatusCode::NOT_FOUND)?;

    let posts: Vec<PostView> = state
        .content()
        .get_posts_by_category(&slug)
        .map(PostView::from)
        .collect();

    Ok(BlogIndexTemplate {
        nav: Nav::build(&state, session.as_ref()),
        heading: name,
        posts,
        categories,
        tags: state.content().get_all_tags(),
        active_category: Some(slug),
    })
}

/// Display a single blog post by slug.
///
/// # Errors
///
/// Returns 404 if the post doesn't exist or is a draft.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    OptionalAuth(session): OptionalAuth,
) -> Result<impl IntoResponse, StatusCode> {
    let post = state
        .content()
        .get_post(&slug)
        .ok_or(StatusCode::NOT_FOUND)?;

    let recent_posts: Vec<PostView> = state
        .content()
        .get_recent_posts(RECENT_POSTS_COUNT, Some(&slug))
        .into_iter()
        .map(PostView::from)
        .collect();

    let base_url = state.config().base_url.clone();
    let share_links = share_links(&format!("{base_url}/blog/{slug}"), &post.meta.title);

    Ok(BlogShowTemplate {
        nav: Nav::build(&state, session.as_ref()),
        post: PostView::from(post),
        recent_posts,
        base_url,
        share_links,
    })
}

/// Create the blog routes router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/category/{slug}", get(category))
        .route("/{slug}", get(show))
}
