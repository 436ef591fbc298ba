use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::board::{FeedBoard, Snapshot};
use crate::error::PageError;
use crate::page::page;
use crate::source::FeedItem;

/// Event name the feed box listens for to reload itself.
pub const REFRESHED_EVENT: &str = "feeds-refreshed";

pub struct AppState {
    pub board: Arc<FeedBoard>,
    pub items_per_page: usize,
}

/// Everything the feed box needs to render one page.
pub struct FeedPanel {
    pub loading: bool,
    pub items: Vec<FeedItem>,
    pub page: usize,
    pub total_pages: usize,
}

impl FeedPanel {
    fn loading() -> Self {
        Self {
            loading: true,
            items: Vec::new(),
            page: 1,
            total_pages: 0,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn prev_page(&self) -> usize {
        self.page.saturating_sub(1)
    }

    pub fn next_page(&self) -> usize {
        self.page + 1
    }
}

// Template structs
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub panel: FeedPanel,
    pub refreshing: bool,
    pub updated: Option<String>,
}

#[derive(Template)]
#[template(path = "feed_page.html")]
pub struct FeedPageTemplate {
    pub panel: FeedPanel,
}

#[derive(Template)]
#[template(path = "refresh_button.html")]
pub struct RefreshButtonTemplate {
    pub refreshing: bool,
}

// Wrapper for HTML responses
struct HtmlTemplate<T>(T);

impl<T: Template> IntoResponse for HtmlTemplate<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

// Custom error type
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if self.0.is::<PageError>() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, format!("Error: {}", self.0)).into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(err: E) -> Self {
        AppError(err.into())
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/feeds", get(feed_page))
        .route("/refresh", post(refresh))
        .route("/refresh/status", get(refresh_status))
        .route("/health", get(health))
        .with_state(state)
}

fn build_panel(
    snapshot: Option<&Snapshot>,
    page_size: usize,
    index: usize,
) -> Result<FeedPanel, PageError> {
    let Some(snapshot) = snapshot else {
        return Ok(FeedPanel::loading());
    };

    let view = page(&snapshot.items, page_size, index)?;
    Ok(FeedPanel {
        loading: false,
        items: view.items.to_vec(),
        page: view.index,
        total_pages: view.total_pages,
    })
}

// Route handlers
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.board.snapshot().await;
    let panel = build_panel(snapshot.as_deref(), state.items_per_page, 1)?;
    let updated = snapshot
        .as_deref()
        .map(|s| s.refreshed_at.format("%H:%M UTC").to_string());

    Ok(HtmlTemplate(IndexTemplate {
        panel,
        refreshing: state.board.is_refreshing(),
        updated,
    }))
}

fn first_page() -> usize {
    1
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: usize,
}

pub async fn feed_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = state.board.snapshot().await;
    let panel = build_panel(snapshot.as_deref(), state.items_per_page, query.page)?;
    Ok(HtmlTemplate(FeedPageTemplate { panel }))
}

pub async fn refresh(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    // Spawn the refresh task
    let board = state.board.clone();
    tokio::spawn(async move {
        board.refresh().await;
    });

    // Return refreshing state immediately
    Ok(HtmlTemplate(RefreshButtonTemplate { refreshing: true }))
}

pub async fn refresh_status(State(state): State<Arc<AppState>>) -> Response {
    let refreshing = state.board.is_refreshing();
    let button = HtmlTemplate(RefreshButtonTemplate { refreshing });

    if refreshing {
        button.into_response()
    } else {
        ([("HX-Trigger", REFRESHED_EVENT)], button).into_response()
    }
}

pub async fn health() -> impl IntoResponse {
    Html("OK")
}
