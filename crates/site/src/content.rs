//! Content management for markdown-based pages and blog posts.
//!
//! This module loads markdown files from the content directory at startup,
//! parses frontmatter metadata, and renders markdown to HTML.
//!
//! # Layout
//!
//! ```text
//! content/
//!   pages/      about.md, advisory-services.md
//!   services/   intune-management.md, ...
//!   projects/   cloud-migration.md, ...
//!   blog/       2024-05-15-intune-deployment-best-practices.md, ...
//! ```

use chrono::NaiveDate;
use comrak::{Options, markdown_to_html};
use gray_matter::{Matter, ParsedEntity, engine::YAML};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Metadata for pages, service pages and project case studies.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Short bullet points rendered next to the body.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Position in navigation menus (ascending).
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
}

/// Metadata for blog posts
#[derive(Debug, Clone, Deserialize)]
pub struct PostMeta {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    pub published_at: NaiveDate,
    #[serde(default)]
    pub updated_at: Option<NaiveDate>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
}

/// A rendered page with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Page {
    pub slug: String,
    pub meta: PageMeta,
    pub content_html: String,
}

/// A rendered blog post with metadata and HTML content
#[derive(Debug, Clone)]
pub struct Post {
    pub slug: String,
    pub meta: PostMeta,
    pub content_html: String,
    pub reading_time_minutes: u32,
}

impl Post {
    /// URL slug of the post's category, if it has one.
    #[must_use]
    pub fn category_slug(&self) -> Option<String> {
        self.meta.category.as_deref().map(slugify)
    }
}

/// A blog category with its number of published posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

/// Which directory a page was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Stand-alone pages (`/about`, `/advisory-services`).
    Pages,
    /// Managed service pages (`/services/{slug}`).
    Services,
    /// Project case studies (`/projects/{slug}`).
    Projects,
}

impl Section {
    const ALL: [Self; 3] = [Self::Pages, Self::Services, Self::Projects];

    const fn dir_name(self) -> &'static str {
        match self {
            Self::Pages => "pages",
            Self::Services => "services",
            Self::Projects => "projects",
        }
    }
}

/// Content store that holds all loaded content in memory
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    sections: Arc<HashMap<Section, Vec<Page>>>,
    posts: Arc<Vec<Post>>,
}

impl ContentStore {
    /// Load all content from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the content directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let mut sections = HashMap::new();
        for section in Section::ALL {
            let pages = Self::load_pages(&content_dir.join(section.dir_name()))?;
            sections.insert(section, pages);
        }
        let posts = Self::load_posts(&content_dir.join("blog"))?;

        Ok(Self {
            sections: Arc::new(sections),
            posts: Arc::new(posts),
        })
    }

    /// Load all pages from one section directory, ordered for menus
    fn load_pages(dir: &Path) -> Result<Vec<Page>, ContentError> {
        let mut pages = Vec::new();

        if !dir.exists() {
            tracing::warn!("Content directory does not exist: {:?}", dir);
            return Ok(pages);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_page(&path) {
                    Ok(page) => {
                        tracing::info!("Loaded page: {}", page.slug);
                        pages.push(page);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        pages.sort_by(|a, b| {
            a.meta
                .order
                .cmp(&b.meta.order)
                .then_with(|| a.slug.cmp(&b.slug))
        });

        Ok(pages)
    }

    /// Load a single page from a markdown file
    fn load_page(path: &Path) -> Result<Page, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        parse_page(slug, &content)
    }

    /// Load all blog posts from the blog directory
    fn load_posts(dir: &Path) -> Result<Vec<Post>, ContentError> {
        let mut posts = Vec::new();

        if !dir.exists() {
            tracing::info!("Blog directory does not exist yet: {:?}", dir);
            return Ok(posts);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "md") {
                match Self::load_post(&path) {
                    Ok(post) => {
                        tracing::info!("Loaded post: {}", post.slug);
                        posts.push(post);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        sort_newest_first(&mut posts);

        Ok(posts)
    }

    /// Load a single blog post from a markdown file
    fn load_post(path: &Path) -> Result<Post, ContentError> {
        let content = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let filename = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?;

        parse_post(post_slug(filename), &content)
    }

    /// Build a store from already-parsed content.
    #[must_use]
    pub fn from_parts(
        pages: Vec<Page>,
        services: Vec<Page>,
        projects: Vec<Page>,
        mut posts: Vec<Post>,
    ) -> Self {
        sort_newest_first(&mut posts);
        let sections = HashMap::from([
            (Section::Pages, pages),
            (Section::Services, services),
            (Section::Projects, projects),
        ]);
        Self {
            sections: Arc::new(sections),
            posts: Arc::new(posts),
        }
    }

    /// Get a page by section and slug
    #[must_use]
    pub fn get_page(&self, section: Section, slug: &str) -> Option<&Page> {
        self.section(section).iter().find(|p| p.slug == slug)
    }

    /// Get every page in a section, in menu order
    #[must_use]
    pub fn section(&self, section: Section) -> &[Page] {
        self.sections.get(&section).map_or(&[], Vec::as_slice)
    }

    /// Get a published blog post by slug
    #[must_use]
    pub fn get_post(&self, slug: &str) -> Option<&Post> {
        self.get_published_posts().find(|p| p.slug == slug)
    }

    /// Get all published blog posts (excludes drafts), newest first
    pub fn get_published_posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.meta.draft)
    }

    /// Get published posts in a category, matched by slug
    pub fn get_posts_by_category<'a>(
        &'a self,
        category_slug: &'a str,
    ) -> impl Iterator<Item = &'a Post> {
        self.get_published_posts()
            .filter(move |p| p.category_slug().as_deref() == Some(category_slug))
    }

    /// Get every category used by a published post, with post counts
    #[must_use]
    pub fn get_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for name in self
            .get_published_posts()
            .filter_map(|p| p.meta.category.as_deref())
        {
            let slug = slugify(name);
            match categories.iter_mut().find(|c| c.slug == slug) {
                Some(category) => category.count += 1,
                None => categories.push(Category {
                    name: name.to_string(),
                    slug,
                    count: 1,
                }),
            }
        }
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    /// Get all unique tags from published posts
    #[must_use]
    pub fn get_all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .get_published_posts()
            .flat_map(|p| p.meta.tags.clone())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Get recent published posts, optionally excluding a specific slug
    #[must_use]
    pub fn get_recent_posts(&self, limit: usize, exclude_slug: Option<&str>) -> Vec<&Post> {
        self.get_published_posts()
            .filter(|p| exclude_slug.is_none_or(|s| p.slug != s))
            .take(limit)
            .collect()
    }
}

/// Parse a page from markdown text with YAML frontmatter.
///
/// # Errors
///
/// Returns `ContentError::Parse` if the frontmatter is missing or invalid.
pub fn parse_page(slug: impl Into<String>, content: &str) -> Result<Page, ContentError> {
    let (meta, body): (PageMeta, String) = parse_frontmatter(content)?;
    Ok(Page {
        slug: slug.into(),
        meta,
        content_html: render_markdown(&body),
    })
}

/// Parse a blog post from markdown text with YAML frontmatter.
///
/// # Errors
///
/// Returns `ContentError::Parse` if the frontmatter is missing or invalid.
pub fn parse_post(slug: impl Into<String>, content: &str) -> Result<Post, ContentError> {
    let (meta, body): (PostMeta, String) = parse_frontmatter(content)?;
    Ok(Post {
        slug: slug.into(),
        meta,
        content_html: render_markdown(&body),
        reading_time_minutes: reading_time_minutes(&body),
    })
}

fn parse_frontmatter<T: serde::de::DeserializeOwned>(
    content: &str,
) -> Result<(T, String), ContentError> {
    let matter = Matter::<YAML>::new();
    let parsed: ParsedEntity<T> = matter
        .parse(content)
        .map_err(|e| ContentError::Parse(format!("Failed to parse frontmatter: {e}")))?;
    let meta = parsed
        .data
        .ok_or_else(|| ContentError::Parse("Missing frontmatter".to_string()))?;
    Ok((meta, parsed.content))
}

/// Strip a `YYYY-MM-DD-` prefix from a post filename.
fn post_slug(filename: &str) -> String {
    let bytes = filename.as_bytes();
    let has_date_prefix = bytes.len() > 11
        && bytes.get(4) == Some(&b'-')
        && bytes.get(7) == Some(&b'-')
        && bytes.get(10) == Some(&b'-')
        && filename.get(..4).is_some_and(|y| y.bytes().all(|b| b.is_ascii_digit()));

    if has_date_prefix {
        filename.get(11..).unwrap_or(filename).to_string()
    } else {
        filename.to_string()
    }
}

/// Estimate reading time at 200 words per minute, at least one minute.
fn reading_time_minutes(body: &str) -> u32 {
    let word_count = body.split_whitespace().count();
    let minutes = word_count.div_ceil(200);
    u32::try_from(minutes).unwrap_or(u32::MAX).max(1)
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.meta.published_at.cmp(&a.meta.published_at));
}

/// Lowercase a label and join its alphanumeric runs with `-`.
///
/// `"Intune Management"` becomes `"intune-management"`.
#[must_use]
pub fn slugify(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Render markdown to HTML with GitHub Flavored Markdown support.
fn render_markdown(content: &str) -> String {
    let mut options = Options::default();

    // Enable GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.extension.header_ids = Some(String::new());

    // Content is authored in-repo
    options.render.r#unsafe = true;

    markdown_to_html(content, &options)
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
