//! Contact and newsletter forms against a mocked email relay.

use reqwest::StatusCode;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

use intune_partner_integration_tests::{TestContext, location};

const CONTACT: &[(&str, &str)] = &[
    ("name", "Ada Lovelace"),
    ("email", "ada@example.com"),
    ("company", "Analytical Engines"),
    ("service", "Device Management"),
    ("message", "We need help enrolling 200 laptops."),
];

#[tokio::test]
async fn test_contact_page_renders() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.get("/contact").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Select a service"));
}

#[tokio::test]
async fn test_contact_without_relay_is_unavailable() {
    let ctx = TestContext::spawn().await;
    let resp = ctx.post_form("/contact", CONTACT).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Failed to send email"));
    // Form keeps what the visitor typed
    assert!(body.contains("Analytical Engines"));
}

#[tokio::test]
async fn test_contact_rejects_invalid_email() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .post_form(
            "/contact",
            &[("name", "Ada"), ("email", "not-an-email"), ("message", "Hi")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_contact_sent_through_relay() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "template_id": "template_contact",
            "template_params": { "from_email": "ada@example.com" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&relay)
        .await;

    let ctx = TestContext::spawn_with_relay(Some(relay.uri())).await;
    let resp = ctx.post_form("/contact", CONTACT).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/contact?sent=1"));

    let body = ctx.get("/contact?sent=1").await.text().await.expect("body");
    assert!(body.contains("Thank you for your message"));
}

#[tokio::test]
async fn test_contact_relay_failure_is_bad_gateway() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad template"))
        .mount(&relay)
        .await;

    let ctx = TestContext::spawn_with_relay(Some(relay.uri())).await;
    let resp = ctx.post_form("/contact", CONTACT).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_newsletter_fragment_for_enhanced_form() {
    let relay = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "template_id": "template_newsletter"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&relay)
        .await;

    let ctx = TestContext::spawn_with_relay(Some(relay.uri())).await;
    let resp = ctx
        .client
        .post(ctx.url("/newsletter/subscribe"))
        .header("HX-Request", "true")
        .form(&[("email", "Reader@Example.com")])
        .send()
        .await
        .expect("request");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("reader@example.com"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn test_newsletter_full_page_for_plain_post() {
    let ctx = TestContext::spawn().await;
    let resp = ctx
        .post_form("/newsletter/subscribe", &[("email", "nope")])
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = resp.text().await.expect("body");
    assert!(body.contains("<html"));
    assert!(body.contains("valid email"));
}
