//! Admin panels.
//!
//! Three read-only views reserved for the `admin` role. Their figures are
//! fixed sample data until tenant reporting exists.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::layout::Nav;
use crate::state::AppState;

// =============================================================================
// Shared Types
// =============================================================================

/// Link to an admin panel, shown on the dashboard.
pub struct AdminPanelLink {
    pub href: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Every admin panel, in menu order.
pub const ADMIN_PANELS: [AdminPanelLink; 3] = [
    AdminPanelLink {
        href: "/admin/system-administration",
        title: "System Administration",
        description: "Monitor services and run maintenance tasks",
    },
    AdminPanelLink {
        href: "/admin/global-policies",
        title: "Global Policies",
        description: "Review policies applied across tenants",
    },
    AdminPanelLink {
        href: "/admin/security-overview",
        title: "Security Overview",
        description: "Security score, alerts and compliance",
    },
];

/// A headline figure.
pub struct Metric {
    pub title: &'static str,
    pub value: &'static str,
    /// Change since last period, if tracked.
    pub change: Option<&'static str>,
    /// CSS modifier: `excellent`, `good`, `normal`, `warning`, `attention`.
    pub status: &'static str,
}

/// An action card. Actions are informational only.
pub struct ActionCard {
    pub title: &'static str,
    pub description: &'static str,
}

// =============================================================================
// System Administration
// =============================================================================

pub struct SystemService {
    pub name: &'static str,
    pub running: bool,
    pub uptime: &'static str,
    pub last_restart: &'static str,
    pub description: &'static str,
}

const SYSTEM_STATS: [Metric; 4] = [
    Metric {
        title: "Active Tenants",
        value: "12",
        change: None,
        status: "excellent",
    },
    Metric {
        title: "Total Users",
        value: "2,847",
        change: None,
        status: "normal",
    },
    Metric {
        title: "Database Health",
        value: "98%",
        change: None,
        status: "excellent",
    },
    Metric {
        title: "System Uptime",
        value: "99.9%",
        change: None,
        status: "excellent",
    },
];

const SYSTEM_SERVICES: [SystemService; 4] = [
    SystemService {
        name: "Intune Management Service",
        running: true,
        uptime: "99.8%",
        last_restart: "2 days ago",
        description: "Core Microsoft Intune management and policy enforcement",
    },
    SystemService {
        name: "Compliance Monitor",
        running: true,
        uptime: "99.5%",
        last_restart: "1 week ago",
        description: "Automated compliance checking and reporting system",
    },
    SystemService {
        name: "Device Sync Engine",
        running: true,
        uptime: "99.9%",
        last_restart: "3 days ago",
        description: "Real-time device synchronization and status updates",
    },
    SystemService {
        name: "Security Analytics",
        running: false,
        uptime: "97.2%",
        last_restart: "6 hours ago",
        description: "Advanced threat detection and security monitoring",
    },
];

const SYSTEM_ACTIONS: [ActionCard; 4] = [
    ActionCard {
        title: "System Maintenance",
        description: "Schedule and manage system maintenance windows",
    },
    ActionCard {
        title: "Performance Monitoring",
        description: "View detailed system performance metrics",
    },
    ActionCard {
        title: "Resource Management",
        description: "Monitor and allocate system resources",
    },
    ActionCard {
        title: "Security Audit",
        description: "Run comprehensive security audits",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "admin/system.html")]
pub struct SystemTemplate {
    pub nav: Nav,
    pub stats: &'static [Metric],
    pub services: &'static [SystemService],
    pub actions: &'static [ActionCard],
}

/// System administration panel.
#[instrument(skip(state, record), fields(subject_id = %record.subject_id))]
pub async fn system(
    State(state): State<AppState>,
    RequireAdmin(record): RequireAdmin,
) -> impl IntoResponse {
    SystemTemplate {
        nav: Nav::build(&state, Some(&record)),
        stats: &SYSTEM_STATS,
        services: &SYSTEM_SERVICES,
        actions: &SYSTEM_ACTIONS,
    }
}

// =============================================================================
// Global Policies
// =============================================================================

pub struct PolicyCategory {
    pub name: &'static str,
    pub count: u32,
}

pub struct Policy {
    pub name: &'static str,
    pub description: &'static str,
    pub active: bool,
    pub last_modified: &'static str,
    pub assigned_devices: u32,
    /// Percent compliant; `None` for drafts.
    pub compliance: Option<&'static str>,
}

const POLICY_CATEGORIES: [PolicyCategory; 4] = [
    PolicyCategory {
        name: "Security Policies",
        count: 8,
    },
    PolicyCategory {
        name: "Device Policies",
        count: 12,
    },
    PolicyCategory {
        name: "User Policies",
        count: 6,
    },
    PolicyCategory {
        name: "Application Policies",
        count: 15,
    },
];

const POLICIES: [Policy; 4] = [
    Policy {
        name: "Enterprise Security Baseline",
        description: "Core security requirements for all enterprise devices",
        active: true,
        last_modified: "2024-01-15",
        assigned_devices: 2847,
        compliance: Some("98.5%"),
    },
    Policy {
        name: "Password Complexity Requirements",
        description: "Enforces strong password policies across all platforms",
        active: true,
        last_modified: "2024-01-12",
        assigned_devices: 2847,
        compliance: Some("96.2%"),
    },
    Policy {
        name: "BitLocker Encryption Policy",
        description: "Mandatory encryption for Windows devices",
        active: true,
        last_modified: "2024-01-10",
        assigned_devices: 1523,
        compliance: Some("99.1%"),
    },
    Policy {
        name: "Mobile Device Security",
        description: "Security requirements for iOS and Android devices",
        active: false,
        last_modified: "2024-01-08",
        assigned_devices: 0,
        compliance: None,
    },
];

const POLICY_ACTIONS: [ActionCard; 3] = [
    ActionCard {
        title: "Deploy Policies",
        description: "Push policy changes to assigned tenants",
    },
    ActionCard {
        title: "Bulk Operations",
        description: "Apply changes to many policies at once",
    },
    ActionCard {
        title: "Policy Templates",
        description: "Start from a tested baseline",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "admin/policies.html")]
pub struct PoliciesTemplate {
    pub nav: Nav,
    pub categories: &'static [PolicyCategory],
    pub policies: &'static [Policy],
    pub actions: &'static [ActionCard],
}

/// Global policies panel.
#[instrument(skip(state, record), fields(subject_id = %record.subject_id))]
pub async fn policies(
    State(state): State<AppState>,
    RequireAdmin(record): RequireAdmin,
) -> impl IntoResponse {
    PoliciesTemplate {
        nav: Nav::build(&state, Some(&record)),
        categories: &POLICY_CATEGORIES,
        policies: &POLICIES,
        actions: &POLICY_ACTIONS,
    }
}

// =============================================================================
// Security Overview
// =============================================================================

pub struct SecurityAlert {
    /// `high`, `medium` or `low`.
    pub severity: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub time: &'static str,
}

pub struct ComplianceRow {
    pub category: &'static str,
    pub compliant: u8,
    pub non_compliant: u8,
    pub total: u32,
}

const SECURITY_METRICS: [Metric; 4] = [
    Metric {
        title: "Overall Security Score",
        value: "94%",
        change: Some("+2%"),
        status: "excellent",
    },
    Metric {
        title: "Active Threats",
        value: "3",
        change: Some("-5"),
        status: "warning",
    },
    Metric {
        title: "Compliant Devices",
        value: "2,789",
        change: Some("+12"),
        status: "good",
    },
    Metric {
        title: "Non-Compliant Devices",
        value: "58",
        change: Some("-8"),
        status: "attention",
    },
];

const SECURITY_ALERTS: [SecurityAlert; 4] = [
    SecurityAlert {
        severity: "high",
        title: "Suspicious Login Activity Detected",
        description: "Multiple failed login attempts from unusual location",
        time: "2 minutes ago",
    },
    SecurityAlert {
        severity: "medium",
        title: "Device Compliance Violation",
        description: "Device missing required security updates",
        time: "15 minutes ago",
    },
    SecurityAlert {
        severity: "low",
        title: "Policy Update Required",
        description: "Security policy needs review and update",
        time: "1 hour ago",
    },
    SecurityAlert {
        severity: "medium",
        title: "Unauthorized App Installation",
        description: "Non-approved application detected on managed device",
        time: "2 hours ago",
    },
];

const COMPLIANCE: [ComplianceRow; 5] = [
    ComplianceRow {
        category: "Password Policy",
        compliant: 98,
        non_compliant: 2,
        total: 2847,
    },
    ComplianceRow {
        category: "Device Encryption",
        compliant: 95,
        non_compliant: 5,
        total: 2847,
    },
    ComplianceRow {
        category: "OS Updates",
        compliant: 92,
        non_compliant: 8,
        total: 2847,
    },
    ComplianceRow {
        category: "Antivirus Status",
        compliant: 99,
        non_compliant: 1,
        total: 2847,
    },
    ComplianceRow {
        category: "App Restrictions",
        compliant: 89,
        non_compliant: 11,
        total: 2847,
    },
];

const SECURITY_ACTIONS: [ActionCard; 3] = [
    ActionCard {
        title: "Run Security Scan",
        description: "Check every managed device now",
    },
    ActionCard {
        title: "Generate Report",
        description: "Export the current security posture",
    },
    ActionCard {
        title: "Review Alerts",
        description: "Triage open security alerts",
    },
];

#[derive(Template, WebTemplate)]
#[template(path = "admin/security.html")]
pub struct SecurityTemplate {
    pub nav: Nav,
    pub metrics: &'static [Metric],
    pub alerts: &'static [SecurityAlert],
    pub compliance: &'static [ComplianceRow],
    pub actions: &'static [ActionCard],
}

/// Security overview panel.
#[instrument(skip(state, record), fields(subject_id = %record.subject_id))]
pub async fn security(
    State(state): State<AppState>,
    RequireAdmin(record): RequireAdmin,
) -> impl IntoResponse {
    SecurityTemplate {
        nav: Nav::build(&state, Some(&record)),
        metrics: &SECURITY_METRICS,
        alerts: &SECURITY_ALERTS,
        compliance: &COMPLIANCE,
        actions: &SECURITY_ACTIONS,
    }
}
