//! HTTP handlers for the catalog pages.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use verne_authz::{require_admin, Availability, Role};
use verne_http::error::AppError;

use super::client::CatalogApi;
use super::form::{BookInput, CreateBookForm, SubmitOutcome};
use super::listing::ListingView;
use super::models::Book;
use super::pages::{self, PageContext};
use super::MOUNT_PATH;

/// Shared, read-only state handed to every books handler.
#[derive(Clone)]
pub struct BooksState {
    pub catalog: Arc<dyn CatalogApi>,
    pub role: Role,
    pub site_title: Arc<str>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub form: Option<String>,
}

/// `GET /books`: fetch the catalog once and render it.
pub async fn list_page(
    State(state): State<BooksState>,
    Query(query): Query<ListQuery>,
) -> Result<Html<String>, AppError> {
    let mut listing = ListingView::new();
    listing.mount(state.catalog.as_ref()).await;

    let mut form = CreateBookForm::new();
    if query.form.as_deref() == Some("open") && state.role.is_admin() {
        form.open();
    }

    render_page(&state, &query.q, listing.filtered(&query.q), &form)
}

/// `POST /books`: submit the creation form.
///
/// Success redirects back to the listing, which re-fetches the catalog.
/// Anything else re-renders the page with the form open and its input kept.
pub async fn create_book(
    State(state): State<BooksState>,
    Form(input): Form<BookInput>,
) -> Result<Response, AppError> {
    require_admin(state.role, "create books")?;

    if !input.status.trim().is_empty()
        && Availability::parse_lenient(&input.status) == Availability::Unknown
    {
        return Err(AppError::bad_request(format!(
            "unknown status '{}'",
            input.status.trim()
        )));
    }

    let mut form = CreateBookForm::with_input(input);
    let mut refresh_requested = false;
    let outcome = form
        .submit(state.catalog.as_ref(), || refresh_requested = true)
        .await;

    if refresh_requested {
        return Ok(Redirect::to(MOUNT_PATH).into_response());
    }

    let status = if let SubmitOutcome::Invalid(message) = &outcome {
        tracing::debug!(%message, "book form rejected");
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    };

    let mut listing = ListingView::new();
    listing.mount(state.catalog.as_ref()).await;
    let page = render_page(&state, "", listing.rows(), &form)?;
    Ok((status, page).into_response())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "books module is healthy"
}

fn render_page<'b>(
    state: &BooksState,
    query: &str,
    books: impl IntoIterator<Item = &'b Book>,
    form: &CreateBookForm,
) -> Result<Html<String>, AppError> {
    let ctx = PageContext {
        site_title: &state.site_title,
        role: state.role,
        base_path: MOUNT_PATH,
        query,
    };
    let html = pages::render_listing(&ctx, books, form)
        .context("failed to render catalog page")?;
    Ok(Html(html))
}
