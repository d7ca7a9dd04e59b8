//! Development server
//!
//! Answers the site routes dynamically from the post store. The store keeps
//! the loaded collection for the configured revalidation window, and a file
//! watcher on the posts directory drops it as soon as a post changes.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    handler::Handler,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::{PostKind, PostStore};
use crate::generator::{feed, sitemap, PageRenderer};
use crate::Folio;

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";
pub const XML_CONTENT_TYPE: &str = "application/xml; charset=utf-8";

/// Server state shared by every handler
pub struct AppState {
    store: PostStore,
    pages: PageRenderer,
    config: SiteConfig,
    static_dir: PathBuf,
}

impl AppState {
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            store: PostStore::for_site(folio),
            pages: PageRenderer::new(&folio.config)?,
            config: folio.config.clone(),
            static_dir: folio.static_dir.clone(),
        })
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }
}

/// Build the site router
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir)
        .not_found_service(not_found_handler.with_state(state.clone()));

    Router::new()
        .route("/", get(home_handler))
        .route("/blog", get(blog_handler))
        .route("/blog/:slug", get(post_handler))
        .route("/blog/kind/:kind", get(kind_handler))
        .route("/feed.xml", get(feed_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(AppState::new(folio)?);
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Watching {} for changes...", folio.posts_dir.display());
        let posts_dir = folio.posts_dir.clone();
        let state = state.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_invalidate(posts_dir, state) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Watch the posts directory and drop the cached collection on change
fn watch_and_invalidate(posts_dir: PathBuf, state: Arc<AppState>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;
    debouncer
        .watcher()
        .watch(&posts_dir, RecursiveMode::NonRecursive)?;
    tracing::debug!("Watching: {:?}", posts_dir);

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                state.store.invalidate();
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

/// A failure while loading or rendering content, answered with HTTP 500
struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E: Into<anyhow::Error>> From<E> for ServerError {
    fn from(e: E) -> Self {
        ServerError(e.into())
    }
}

/// What a page handler produced
enum Page {
    Found(String),
    Missing,
}

/// Load and render on the blocking pool
async fn render<F>(state: &Arc<AppState>, f: F) -> Result<Response, ServerError>
where
    F: FnOnce(&AppState) -> Result<Page> + Send + 'static,
{
    let worker = state.clone();
    let page = tokio::task::spawn_blocking(move || f(&worker)).await??;

    Ok(match page {
        Page::Found(html) => Html(html).into_response(),
        Page::Missing => not_found_response(state),
    })
}

fn not_found_response(state: &AppState) -> Response {
    match state.pages.not_found() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => ServerError(e).into_response(),
    }
}

async fn home_handler(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    render(&state, |state| {
        let posts = state.store.list_published()?;
        Ok(Page::Found(state.pages.home(&posts)?))
    })
    .await
}

#[derive(Debug, Deserialize)]
struct BlogQuery {
    #[serde(alias = "type")]
    kind: Option<String>,
}

async fn blog_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BlogQuery>,
) -> Result<Response, ServerError> {
    let kind = match query.kind.as_deref() {
        None | Some("") => None,
        Some(kind) => match kind.parse::<PostKind>() {
            Ok(kind) => Some(kind),
            Err(_) => return Ok(not_found_response(&state)),
        },
    };
    blog_index(&state, kind).await
}

async fn kind_handler(
    State(state): State<Arc<AppState>>,
    Path(plural): Path<String>,
) -> Result<Response, ServerError> {
    match PostKind::from_plural(&plural) {
        Some(kind) => blog_index(&state, Some(kind)).await,
        None => Ok(not_found_response(&state)),
    }
}

async fn blog_index(state: &Arc<AppState>, kind: Option<PostKind>) -> Result<Response, ServerError> {
    render(state, move |state| {
        let posts = match kind {
            Some(kind) => state.store.list_by_kind(kind)?,
            None => state.store.list_published()?,
        };
        Ok(Page::Found(state.pages.blog_index(&posts, kind)?))
    })
    .await
}

async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Response, ServerError> {
    render(&state, move |state| {
        let Some(post) = state.store.find_by_slug(&slug)? else {
            return Ok(Page::Missing);
        };
        let adjacent = state.store.find_adjacent(&slug)?;
        Ok(Page::Found(state.pages.post(&post, &adjacent)?))
    })
    .await
}

async fn feed_handler(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    let worker = state.clone();
    let xml = tokio::task::spawn_blocking(move || -> Result<String> {
        let posts = worker.store.list_published()?;
        feed::rss_feed(&worker.config, &posts, worker.pages.markdown())
    })
    .await??;

    let cache_control = format!(
        "public, s-maxage={}, stale-while-revalidate=86400",
        state.config.revalidate
    );
    Ok((
        [
            (header::CONTENT_TYPE, RSS_CONTENT_TYPE.to_string()),
            (header::CACHE_CONTROL, cache_control),
        ],
        xml,
    )
        .into_response())
}

async fn sitemap_handler(State(state): State<Arc<AppState>>) -> Result<Response, ServerError> {
    let worker = state.clone();
    let xml = tokio::task::spawn_blocking(move || -> Result<String> {
        let posts = worker.store.list_published()?;
        Ok(sitemap::sitemap(&worker.config, &posts, chrono::Utc::now()))
    })
    .await??;

    Ok(([(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response())
}

async fn not_found_handler(State(state): State<Arc<AppState>>) -> Response {
    not_found_response(&state)
}
