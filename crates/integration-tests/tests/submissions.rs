//! Write-path tests: thread and comment submissions, validation failures,
//! and the redirect-then-fetch round trip.

use actix_web::http::{header, StatusCode};
use actix_web::{test, App};
use serde_json::json;

use integration_tests::test_state;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(test_state())
                .configure(ds_api::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn the_submit_form_renders() {
    let app = app!();
    let req = test::TestRequest::get().uri("/abc/submit").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(r#"name="title""#));
    assert!(html.contains(r#"name="text""#));
}

#[actix_web::test]
async fn submitting_a_thread_redirects_to_it() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/abc/submit")
        .set_form(json!({"title": "Hello", "text": "World"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert_eq!(target, "/abc/thread/1");

    // The round trip: the redirect target shows the submitted thread.
    let req = test::TestRequest::get().uri(&target).to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("Hello"));
    assert!(html.contains("World"));

    // And it is listed on page 1 of the board.
    let req = test::TestRequest::get().uri("/abc").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains("0 comments"));
}

#[actix_web::test]
async fn an_empty_title_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/abc/submit")
        .set_form(json!({"title": "", "text": "World"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // No partial write happened.
    let req = test::TestRequest::get().uri("/abc").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(!html.contains("comments"));
}

#[actix_web::test]
async fn submitting_to_an_unknown_board_is_404() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/doesnotexist/submit")
        .set_form(json!({"title": "Hello", "text": "World"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn commenting_redirects_to_the_comment_anchor() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/abc/submit")
        .set_form(json!({"title": "Hello", "text": "World"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::post()
        .uri("/abc/thread/1")
        .set_form(json!({"text": "First!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let target = resp
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert_eq!(target, "/abc/thread/1#c2");

    let req = test::TestRequest::get().uri("/abc/thread/1").to_request();
    let body = test::call_and_read_body(&app, req).await;
    let html = std::str::from_utf8(&body).unwrap();
    assert!(html.contains(r#"id="c2""#));
    assert!(html.contains("First!"));
}

#[actix_web::test]
async fn a_blank_comment_is_unprocessable() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/abc/submit")
        .set_form(json!({"title": "Hello", "text": "World"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/abc/thread/1")
        .set_form(json!({"text": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
