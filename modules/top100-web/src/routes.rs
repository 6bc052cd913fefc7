use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::debug;

use top100_common::{Catalog, Category, DirectoryState, DisplayRecord};

use crate::templates::{render_about, render_directory, render_not_found};

// --- App State ---

pub struct AppState {
    pub catalog: Catalog,
    pub affiliate_tag: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(directory_page))
        .route("/about", get(about_page))
        .route("/api/categories", get(api_categories))
        .route("/api/categories/{slug}/books", get(api_books))
        .fallback(not_found)
        .with_state(state)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        // Method + path only; query strings carry nothing worth logging.
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

// --- Handlers ---

/// View state carried in the directory page's query string: `tab=<slug>`
/// plus one `expanded=<card key>` per expanded card.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub tab: Option<String>,
    pub expanded: Vec<String>,
}

impl DirectoryQuery {
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "tab" => parsed.tab = Some(value.into_owned()),
                "expanded" if !value.is_empty() => parsed.expanded.push(value.into_owned()),
                _ => {}
            }
        }
        parsed
    }

    /// View state described by this query, or `None` for an unknown tab.
    pub fn state(&self) -> Option<DirectoryState> {
        let active = match self.tab.as_deref() {
            Some(slug) => slug.parse().ok()?,
            None => Category::default(),
        };
        Some(DirectoryState::with_expanded(
            active,
            self.expanded.iter().map(String::as_str),
        ))
    }
}

async fn directory_page(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let query = DirectoryQuery::parse(query.as_deref().unwrap_or_default());
    let Some(view) = query.state() else {
        debug!(tab = ?query.tab, "Unknown category tab");
        return not_found().await.into_response();
    };
    let cards = view.cards(&state.catalog);
    Html(render_directory(&view, &cards, &state.affiliate_tag)).into_response()
}

async fn about_page() -> impl IntoResponse {
    Html(render_about())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Html(render_not_found()))
}

#[derive(Serialize)]
struct CategoryJson {
    slug: &'static str,
    title: &'static str,
}

async fn api_categories() -> impl IntoResponse {
    let categories: Vec<CategoryJson> = Category::ALL
        .iter()
        .map(|c| CategoryJson {
            slug: c.slug(),
            title: c.title(),
        })
        .collect();
    Json(categories)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BookJson {
    #[serde(flatten)]
    record: DisplayRecord,
    affiliate_url: String,
}

async fn api_books(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    let Ok(category) = slug.parse::<Category>() else {
        return (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("unknown category: {slug}") })),
        )
            .into_response();
    };

    let books: Vec<BookJson> = state
        .catalog
        .display(category)
        .into_iter()
        .map(|record| BookJson {
            affiliate_url: top100_common::affiliate_url(&record.url, &state.affiliate_tag),
            record,
        })
        .collect();
    Json(books).into_response()
}
