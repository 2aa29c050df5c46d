//! Shared page chrome.
//!
//! Every full-page template carries a [`Nav`] so the header can list the
//! service and project menus and reflect who is signed in.

use crate::content::Section;
use crate::models::SessionRecord;
use crate::state::AppState;

/// A menu entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

/// Header and footer context.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    pub services: Vec<NavLink>,
    pub projects: Vec<NavLink>,
    pub signed_in: bool,
    pub is_admin: bool,
    pub display_name: String,
}

impl Nav {
    /// Build the navigation for the current visitor.
    #[must_use]
    pub fn build(state: &AppState, session: Option<&SessionRecord>) -> Self {
        let links = |section: Section, prefix: &str| -> Vec<NavLink> {
            state
                .content()
                .section(section)
                .iter()
                .map(|page| NavLink {
                    href: format!("/{prefix}/{}", page.slug),
                    label: page.meta.title.clone(),
                })
                .collect()
        };

        Self {
            services: links(Section::Services, "services"),
            projects: links(Section::Projects, "projects"),
            signed_in: session.is_some(),
            is_admin: session.is_some_and(SessionRecord::is_admin),
            display_name: session.map(|s| s.display_name.clone()).unwrap_or_default(),
        }
    }
}
