//! Catalog pages driven through the module router.
mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{book, count_cards, read_text, FakeCatalog};
use tower::ServiceExt;
use verne_app::books::{self, client::CatalogApi};
use verne_authz::{Availability, Role};
use verne_kernel::settings::UiSettings;

fn pages(catalog: Arc<FakeCatalog>, role: Role) -> Router {
    let ui = UiSettings {
        role,
        ..UiSettings::default()
    };
    let catalog: Arc<dyn CatalogApi> = catalog;
    books::create_module(catalog, &ui).routes()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn listing_renders_every_record_after_a_single_fetch() {
    let catalog = Arc::new(FakeCatalog::with_books(vec![
        book(5, "Voyage au centre de la Terre", Availability::Available),
        book(2, "Robur le Conquérant", Availability::Borrowed),
        book(9, "Le Rayon vert", Availability::Reserved),
    ]));

    let response = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(get("/"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;

    assert_eq!(count_cards(&html), 3);
    assert_eq!(catalog.list_calls(), 1);
    let positions: Vec<usize> = ["data-id=\"5\"", "data-id=\"2\"", "data-id=\"9\""]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(html.contains("edit-button"));
    assert!(html.contains("Add a book"));
    assert!(!html.contains("modal-form"));
}

#[tokio::test]
async fn empty_catalog_renders_zero_rows() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(catalog, Role::Member).oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = read_text(response).await;
    assert_eq!(count_cards(&html), 0);
    assert!(!html.contains("Add a book"));
}

#[tokio::test]
async fn search_filters_rows() {
    let catalog = Arc::new(FakeCatalog::with_books(vec![
        book(1, "Cinq semaines en ballon", Availability::Available),
        book(2, "Le Sphinx des glaces", Availability::Available),
    ]));

    let response = pages(catalog, Role::Member)
        .oneshot(get("/?q=SPHINX"))
        .await
        .unwrap();
    let html = read_text(response).await;
    assert_eq!(count_cards(&html), 1);
    assert!(html.contains("Le Sphinx des glaces"));
    assert!(html.contains("value=\"SPHINX\""));
}

#[tokio::test]
async fn form_opens_for_admin_only() {
    let catalog = Arc::new(FakeCatalog::default());

    let admin = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(get("/?form=open"))
        .await
        .unwrap();
    assert!(read_text(admin).await.contains("modal-form"));

    let member = pages(catalog, Role::Member)
        .oneshot(get("/?form=open"))
        .await
        .unwrap();
    assert!(!read_text(member).await.contains("modal-form"));
}

#[tokio::test]
async fn successful_submission_redirects_to_listing() {
    let catalog = Arc::new(FakeCatalog::default());
    let router = pages(Arc::clone(&catalog), Role::Admin);

    let response = router
        .clone()
        .oneshot(post_form(
            "title=Michel+Strogoff&author=Jules+Verne&year=1876&isbn=&status=available",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/books");
    assert_eq!(catalog.create_calls(), 1);
    let sent = catalog.created.lock().unwrap()[0].clone();
    assert_eq!(sent.title, "Michel Strogoff");
    assert_eq!(sent.year, Some(1876));
    assert_eq!(sent.isbn, None);

    let html = read_text(router.oneshot(get("/")).await.unwrap()).await;
    assert_eq!(count_cards(&html), 1);
    assert!(html.contains("Michel Strogoff"));
}

#[tokio::test]
async fn missing_author_is_rejected_without_calling_the_catalog() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(post_form("title=Michel+Strogoff&author=++"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(catalog.create_calls(), 0);
    let html = read_text(response).await;
    assert!(html.contains("The author is required."));
    assert!(html.contains("value=\"Michel Strogoff\""));
}

#[tokio::test]
async fn catalog_failure_keeps_form_open_with_error() {
    let catalog = Arc::new(FakeCatalog::rejecting());

    let response = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(post_form(
            "title=Michel+Strogoff&author=Jules+Verne&summary=Courier+of+the+Tsar",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(catalog.create_calls(), 1);
    let html = read_text(response).await;
    assert!(html.contains("form-error"));
    assert!(html.contains("could not be saved"));
    assert!(html.contains("value=\"Jules Verne\""));
    assert!(html.contains(">Courier of the Tsar</textarea>"));
}

#[tokio::test]
async fn member_cannot_submit() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(Arc::clone(&catalog), Role::Member)
        .oneshot(post_form("title=Michel+Strogoff&author=Jules+Verne"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(catalog.create_calls(), 0);
}

#[tokio::test]
async fn tampered_status_is_a_bad_request() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(post_form("title=Michel+Strogoff&author=Jules+Verne&status=stolen"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(catalog.create_calls(), 0);
}

#[tokio::test]
async fn blank_status_is_sent_as_available() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(Arc::clone(&catalog), Role::Admin)
        .oneshot(post_form("title=Michel+Strogoff&author=Jules+Verne&status="))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(catalog.create_calls(), 1);
    let sent = catalog.created.lock().unwrap()[0].clone();
    assert_eq!(sent.status, Availability::Available);
}

#[tokio::test]
async fn open_form_disables_its_submit_control_on_submit() {
    let catalog = Arc::new(FakeCatalog::default());

    let response = pages(catalog, Role::Admin)
        .oneshot(get("/?form=open"))
        .await
        .unwrap();
    let html = read_text(response).await;

    assert!(html.contains("<form class=\"modal-form\" method=\"post\" action=\"/books\" onsubmit=\""));
    assert!(html.contains("type=\"submit\" class=\"btn-primary\""));
}
