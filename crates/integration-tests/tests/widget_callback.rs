//! Widget hand-off and the `user` role.

use reqwest::StatusCode;

use intune_partner_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_callback_rejects_blank_identifiers() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .client
        .post(ctx.url("/api/auth/callback"))
        .json(&serde_json::json!({ "userId": "  ", "token": "t" }))
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = ctx.get("/dashboard").await;
    assert_eq!(location(&resp), Some("/auth/login"));
}

#[tokio::test]
async fn test_callback_echoes_new_user_flag() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.login_via_callback("u-42", true).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(json["new_user"], true);
}

#[tokio::test]
async fn test_widget_user_sees_dashboard_without_admin_controls() {
    let ctx = TestContext::spawn().await;
    ctx.login_via_callback("u-42", false).await;

    let resp = ctx.get("/dashboard").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("User ID: u-42"));
    assert!(!body.contains("Admin Controls"));
}

#[tokio::test]
async fn test_widget_user_is_denied_admin_panels_in_place() {
    let ctx = TestContext::spawn().await;
    ctx.login_via_callback("u-42", false).await;

    for path in ["/admin/system-administration", "/admin/global-policies", "/admin/security-overview"] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{path}");
        assert!(location(&resp).is_none(), "{path}");
        let body = resp.text().await.expect("body");
        assert!(body.contains("Access Denied"), "{path}");
    }
}

#[tokio::test]
async fn test_onboarding_requires_session() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/onboarding").await;
    assert_eq!(location(&resp), Some("/auth/login"));
}

#[tokio::test]
async fn test_onboarding_submit_returns_home() {
    let ctx = TestContext::spawn().await;
    ctx.login_via_callback("u-7", true).await;

    let resp = ctx.get("/onboarding").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Setup Your Workspace"));

    let resp = ctx
        .post_form(
            "/onboarding",
            &[
                ("organization_size", "51-250 devices"),
                ("primary_goal", "Compliance"),
            ],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));
}

#[tokio::test]
async fn test_admin_login_replaces_widget_session() {
    let ctx = TestContext::spawn().await;
    ctx.login_via_callback("u-9", false).await;
    assert_eq!(
        ctx.get("/admin/system-administration").await.status(),
        StatusCode::FORBIDDEN
    );

    ctx.login_as_admin().await;
    assert_eq!(ctx.get("/admin/system-administration").await.status(), StatusCode::OK);
}
