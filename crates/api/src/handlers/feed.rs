use axum::{
    body::Body,
    extract::{OriginalUri, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use rulefeed_application::cache::{CachedResponse, RequestContext};
use rulefeed_domain::DomainError;
use tracing::{debug, error, instrument, warn};

use crate::{dto::FeedQuery, state::AppState};

const FEED_SUFFIX: &str = ".rss";

pub fn routes() -> Router<AppState> {
    Router::new().route("/{name}", get(get_feed))
}

#[instrument(skip_all, name = "get_feed")]
async fn get_feed(
    State(state): State<AppState>,
    Path(name): Path<String>,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<FeedQuery>,
    headers: HeaderMap,
) -> Response {
    let ctx = request_context(&uri, &headers);
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());

    let result = state
        .response_cache
        .respond(&ctx, || build_feed(&state, &name, &query, &ctx, host))
        .await;

    match result {
        Ok(response) => to_http_response(response),
        Err(e) => error_response(e),
    }
}

async fn build_feed(
    state: &AppState,
    raw_name: &str,
    query: &FeedQuery,
    ctx: &RequestContext,
    host: Option<&str>,
) -> Result<CachedResponse, DomainError> {
    let name = feed_name(raw_name);
    let rule_list = state.get_rule_list.execute(&name).await?;

    if !query.wants_raw() && !state.feed.is_aggregator(ctx.user_agent.as_deref()) {
        let location = state.feed.proxy_url(&name);
        debug!(name = %name, location = %location, "Redirecting to feed proxy");
        return Ok(CachedResponse::new(StatusCode::FOUND.as_u16())
            .with_header(header::LOCATION.as_str(), location));
    }

    let window = query.window(state.feed.default_num)?;
    let link = feed_link(host, &name);
    let feed = state
        .render_feed
        .execute(&rule_list, window, &link)
        .await?;

    debug!(name = %name, entries = feed.entries, "Feed built");
    Ok(CachedResponse::new(StatusCode::OK.as_u16())
        .with_header(header::LAST_MODIFIED.as_str(), http_date(&rule_list.date))
        .with_header(header::CONTENT_TYPE.as_str(), feed.content_type)
        .with_body(feed.body))
}

/// Lower-cased list name with any trailing `.rss` removed.
pub fn feed_name(raw: &str) -> String {
    let name = raw.to_lowercase();
    match name.strip_suffix(FEED_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

pub fn request_context(uri: &axum::http::Uri, headers: &HeaderMap) -> RequestContext {
    RequestContext {
        path_and_query: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        authenticated: headers.contains_key(header::AUTHORIZATION),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    }
}

fn feed_link(host: Option<&str>, name: &str) -> String {
    match host {
        Some(host) => format!("http://{}/{}", host, name),
        None => format!("/{}", name),
    }
}

fn http_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn to_http_response(cached: CachedResponse) -> Response {
    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &cached.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.body(Body::from(cached.body)) {
        Ok(response) => response,
        Err(e) => {
            error!(error = %e, "Cached response could not be rebuilt");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub fn error_status(e: &DomainError) -> StatusCode {
    match e {
        DomainError::RuleListNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::FetchWindowTooLarge { .. } => StatusCode::PRECONDITION_FAILED,
        DomainError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(e: DomainError) -> Response {
    let status = error_status(&e);
    if status.is_server_error() {
        error!(error = %e, "Feed request failed");
    } else {
        warn!(error = %e, status = status.as_u16(), "Feed request rejected");
    }
    (status, e.to_string()).into_response()
}
