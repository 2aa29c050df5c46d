//! Admin login, logout and gate behavior over HTTP.

use reqwest::StatusCode;

use intune_partner_integration_tests::{
    ADMIN_EMAIL, ADMIN_NAME, ADMIN_PASSWORD, ADMIN_TITLE, TestContext, location,
};

#[tokio::test]
async fn test_login_page_renders() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/auth/login").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Welcome Back"));
}

#[tokio::test]
async fn test_dashboard_redirects_anonymous_visitor() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login"));
}

#[tokio::test]
async fn test_admin_panel_redirects_anonymous_visitor() {
    let ctx = TestContext::spawn().await;
    for path in ["/admin/system-administration", "/admin/global-policies", "/admin/security-overview"] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp), Some("/auth/login"), "{path}");
    }
}

#[tokio::test]
async fn test_login_with_missing_fields() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .post_form("/auth/login", &[("email", ADMIN_EMAIL), ("password", "")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login?error=missing"));
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .post_form(
            "/auth/login",
            &[("email", ADMIN_EMAIL), ("password", "not-the-password")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login?error=credentials"));

    // Still anonymous
    let resp = ctx.get("/dashboard").await;
    assert_eq!(location(&resp), Some("/auth/login"));

    let resp = ctx.get("/auth/login?error=credentials").await;
    let body = resp.text().await.expect("body");
    assert!(body.contains("Invalid credentials"));
}

#[tokio::test]
async fn test_admin_login_is_case_insensitive_on_email() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .post_form(
            "/auth/login",
            &[
                ("email", "ADMIN@YourIntunePartner.com"),
                ("password", ADMIN_PASSWORD),
            ],
        )
        .await;
    assert_eq!(location(&resp), Some("/dashboard"));
}

#[tokio::test]
async fn test_admin_login_reaches_dashboard_and_panels() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.login_as_admin().await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/dashboard"));

    let resp = ctx.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains(ADMIN_NAME));
    assert!(body.contains(ADMIN_TITLE));
    assert!(body.contains(&format!("Admin: {ADMIN_NAME}")));
    assert!(body.contains("Admin Controls"));

    for (path, heading) in [
        ("/admin/system-administration", "System Administration"),
        ("/admin/global-policies", "Global Policies"),
        ("/admin/security-overview", "Security Overview"),
    ] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body = resp.text().await.expect("body");
        assert!(body.contains(heading), "{path}");
    }
}

#[tokio::test]
async fn test_login_page_redirects_signed_in_visitor() {
    let ctx = TestContext::spawn().await;
    ctx.login_as_admin().await;

    let resp = ctx.get("/auth/login").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/dashboard"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::spawn().await;
    ctx.login_as_admin().await;
    assert_eq!(ctx.get("/dashboard").await.status(), StatusCode::OK);

    let resp = ctx.post_form("/auth/logout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login?success=logged_out"));

    let resp = ctx.get("/dashboard").await;
    assert_eq!(location(&resp), Some("/auth/login"));
}

#[tokio::test]
async fn test_logout_without_session_is_harmless() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.post_form("/auth/logout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth/login?success=logged_out"));
}

#[tokio::test]
async fn test_header_reflects_session() {
    let ctx = TestContext::spawn().await;
    let body = ctx.get("/").await.text().await.expect("body");
    assert!(body.contains("href=\"/auth/login\""));
    assert!(!body.contains("action=\"/auth/logout\""));

    ctx.login_as_admin().await;
    let body = ctx.get("/").await.text().await.expect("body");
    assert!(body.contains("href=\"/dashboard\""));
    assert!(body.contains("action=\"/auth/logout\""));
}
