//! Public pages, blog and infrastructure endpoints.

use reqwest::StatusCode;

use intune_partner_integration_tests::TestContext;

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/health/ready").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_home_lists_services_and_stats() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Intune Management"));
    assert!(body.contains("500+"));
    assert!(body.contains("(404) 480-3547"));
}

#[tokio::test]
async fn test_content_pages() {
    let ctx = TestContext::spawn().await;
    for (path, title) in [
        ("/about", "About YourIntunePartner"),
        ("/advisory-services", "Advisory Services"),
        ("/services/intune-management", "Intune Management"),
        ("/services/device-management", "Device Management"),
        ("/projects/cloud-migration", "Cloud Migration"),
        ("/projects/security-assessment", "Security Assessment"),
    ] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::OK, "{path}");
        let body = resp.text().await.expect("body");
        assert!(body.contains(title), "{path}");
    }
}

#[tokio::test]
async fn test_unknown_pages_are_not_found() {
    let ctx = TestContext::spawn().await;
    for path in [
        "/services/crypto-mining",
        "/projects/nope",
        "/blog/missing-post",
        "/blog/category/missing",
    ] {
        let resp = ctx.get(path).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_blog_index_and_category() {
    let ctx = TestContext::spawn().await;
    let body = ctx.get("/blog").await.text().await.expect("body");
    assert!(body.contains("Best Practices for Microsoft Intune Deployment"));
    assert!(body.contains("/blog/category/security"));

    let resp = ctx.get("/blog/category/security").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Securing Your Remote Workforce"));
    assert!(!body.contains("Automating Compliance Reporting"));
}

#[tokio::test]
async fn test_blog_post() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/blog/zero-trust-microsoft").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Jennifer Lee"));
    assert!(body.contains("March 5, 2024"));
}

#[tokio::test]
async fn test_security_headers_and_request_id() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/about").await;
    let headers = resp.headers();
    assert!(headers.contains_key("content-security-policy"));
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/static/css/site.css").await;
    assert_eq!(resp.status(), StatusCode::OK);
}
