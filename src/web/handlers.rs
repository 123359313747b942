//! Route handlers.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::{Form, FormRejection};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::download::ARCHIVE_FILENAME;
use crate::download::filename::attachment_disposition;
use crate::filter::{Category, filter_items};
use crate::pagination::{offset_for_page, paginate, parse_page};

use super::AppState;
use super::error::{
    INVALID_DOWNLOAD_MESSAGE, INVALID_LINK_MESSAGE, INVALID_REQUEST_MESSAGE, MISSING_LINK_MESSAGE,
    NO_SELECTION_MESSAGE, WebError,
};
use super::flash::{self, Flash};
use super::views::{self, FilesView};

/// Response header carrying the number of paths left out of an archive.
pub const ARCHIVE_WARNINGS_HEADER: &str = "x-archive-warnings";

/// Per-path warnings flashed after a multi-download; the rest are summarized.
const MAX_WARNING_FLASHES: usize = 10;

const OCTET_STREAM: &str = "application/octet-stream";
const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Body of the link form.
#[derive(Debug, Deserialize)]
pub struct LinkForm {
    /// Pasted share link.
    pub public_key: Option<String>,
}

/// Query of the listing page.
#[derive(Debug, Default, Deserialize)]
pub struct FilesQuery {
    /// Share link being browsed.
    pub public_key: Option<String>,
    /// 1-based page; lenient.
    pub page: Option<String>,
    /// Category parameter; lenient.
    pub file_type: Option<String>,
}

/// Query of a single-file download.
#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    /// Share link.
    pub public_key: Option<String>,
    /// Resource path inside the share.
    pub file_path: Option<String>,
}

/// Body of the multi-download form (`file_paths` repeats).
#[derive(Debug, Default, Deserialize)]
pub struct MultiDownloadForm {
    /// Share link.
    pub public_key: Option<String>,
    /// Selected resource paths.
    #[serde(default)]
    pub file_paths: Vec<String>,
}

/// `GET /`
pub async fn index(jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, flashes) = flash::take(jar);
    (jar, Html(views::index_page(&flashes).into_string()))
}

/// `POST /`
#[instrument(skip_all)]
pub async fn submit_link(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    form: Result<Form<LinkForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return rejected(jar, &rejection, INVALID_REQUEST_MESSAGE),
    };
    let Some(share_key) = non_empty(form.public_key) else {
        return redirect_with(jar, "/", &WebError::validation(MISSING_LINK_MESSAGE));
    };
    if !state.validator.is_valid(&share_key) {
        debug!(share_key = %share_key, "rejected share link");
        return redirect_with(jar, "/", &WebError::validation(INVALID_LINK_MESSAGE));
    }
    Redirect::to(&views::files_location(&share_key, 1, Category::All)).into_response()
}

/// `GET /files`
#[instrument(skip_all, fields(page, category))]
pub async fn files(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    query: Result<Query<FilesQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(jar, &rejection, INVALID_REQUEST_MESSAGE),
    };
    let share_key = match checked_share_key(&state, query.public_key) {
        Ok(share_key) => share_key,
        Err(error) => return redirect_with(jar, "/", &error),
    };

    let page = parse_page(query.page.as_deref());
    let category = Category::from_param(query.file_type.as_deref());
    let span = tracing::Span::current();
    span.record("page", page);
    span.record("category", category.as_param());

    let limit = state.page_size;
    let offset = offset_for_page(page, limit);
    let listing = match state.api.list_public_resource(&share_key, limit, offset).await {
        Ok(listing) => listing,
        Err(error) => {
            warn!(error = %error, "listing failed");
            return redirect_with(jar, "/", &WebError::from(error));
        }
    };

    for (position, item) in listing.items.iter().enumerate() {
        debug!(
            position,
            name = %item.name,
            mime_type = item.mime_type.as_deref().unwrap_or(""),
            "listed item"
        );
    }

    let links = paginate(listing.total, limit, offset, page);
    debug!(
        total = listing.total,
        prev = ?links.prev_page,
        next = ?links.next_page,
        "pagination"
    );

    let total = listing.total;
    let items = filter_items(listing.items, category);
    let view = FilesView {
        share_key: &share_key,
        items: &items,
        category,
        page,
        total,
        links,
    };
    let (jar, flashes) = flash::take(jar);
    (jar, Html(views::files_page(&view, &flashes).into_string())).into_response()
}

/// `GET /download`
#[instrument(skip_all)]
pub async fn download(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    query: Result<Query<DownloadQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => return rejected(jar, &rejection, INVALID_DOWNLOAD_MESSAGE),
    };
    let (Some(share_key), Some(path)) = (non_empty(query.public_key), non_empty(query.file_path))
    else {
        return redirect_with(jar, "/", &WebError::validation(INVALID_DOWNLOAD_MESSAGE));
    };
    if !state.validator.is_valid(&share_key) {
        return redirect_with(jar, "/", &WebError::validation(INVALID_LINK_MESSAGE));
    }

    match state.resolver.resolve(&share_key, &path).await {
        Ok(file) => {
            info!(path = %file.path, bytes = file.bytes.len(), "serving file");
            let headers = attachment_headers(file.content_type.as_deref(), &file.name);
            (jar, headers, Body::from(file.bytes)).into_response()
        }
        Err(error) => {
            warn!(error = %error, "download failed");
            let location = views::files_location(&share_key, 1, Category::All);
            redirect_with(jar, &location, &WebError::from(error))
        }
    }
}

/// `POST /download_multiple`
#[instrument(skip_all, fields(requested))]
pub async fn download_multiple(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    form: Result<Form<MultiDownloadForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(rejection) => return rejected(jar, &rejection, INVALID_REQUEST_MESSAGE),
    };
    let share_key = match checked_share_key(&state, form.public_key) {
        Ok(share_key) => share_key,
        Err(error) => return redirect_with(jar, "/", &error),
    };
    let location = views::files_location(&share_key, 1, Category::All);

    let paths: Vec<String> = form
        .file_paths
        .into_iter()
        .filter(|path| !path.trim().is_empty())
        .collect();
    if paths.is_empty() {
        let jar = flash::push(jar, [Flash::warning(NO_SELECTION_MESSAGE)]);
        return (jar, Redirect::to(&location)).into_response();
    }
    tracing::Span::current().record("requested", paths.len());

    let archive = match state.bundler.bundle(&share_key, &paths).await {
        Ok(archive) => archive,
        Err(error) => {
            warn!(error = %error, "archive build failed");
            let jar = flash::push(jar, [Flash::danger(format!("Error occurred: {error}"))]);
            return (jar, Redirect::to(&location)).into_response();
        }
    };

    let failed = archive.warnings.len();
    let requested = archive.entries.len() + failed;
    let mut flashes: Vec<Flash> = archive
        .warnings
        .iter()
        .take(MAX_WARNING_FLASHES)
        .map(|warning| match warning.status {
            Some(status) => Flash::warning(format!("Could not add {} (HTTP {status})", warning.path)),
            None => Flash::warning(format!("Could not add {}: {}", warning.path, warning.message)),
        })
        .collect();
    if archive.is_partial() {
        flashes.push(WebError::PartialBatchFailure { failed, requested }.flash());
    }

    if archive.is_empty() {
        return (flash::push(jar, flashes), Redirect::to(&location)).into_response();
    }

    info!(
        entries = archive.entries.len(),
        warnings = failed,
        bytes = archive.bytes.len(),
        "serving archive"
    );
    let mut headers = attachment_headers(Some(ZIP_CONTENT_TYPE), ARCHIVE_FILENAME);
    headers.insert(
        HeaderName::from_static(ARCHIVE_WARNINGS_HEADER),
        HeaderValue::from(failed),
    );
    (flash::push(jar, flashes), headers, Body::from(archive.bytes)).into_response()
}

/// `GET /healthz`
pub async fn healthz() -> &'static str {
    "ok"
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn checked_share_key(state: &AppState, raw: Option<String>) -> Result<String, WebError> {
    let share_key = non_empty(raw).ok_or_else(|| WebError::validation(MISSING_LINK_MESSAGE))?;
    if state.validator.is_valid(&share_key) {
        Ok(share_key)
    } else {
        Err(WebError::validation(INVALID_LINK_MESSAGE))
    }
}

fn redirect_with(jar: CookieJar, location: &str, error: &WebError) -> Response {
    (flash::push(jar, [error.flash()]), Redirect::to(location)).into_response()
}

/// Redirects home for a query or form that could not be parsed.
fn rejected(jar: CookieJar, rejection: &dyn std::fmt::Display, message: &str) -> Response {
    debug!(error = %rejection, "unparseable request");
    redirect_with(jar, "/", &WebError::validation(message))
}

fn attachment_headers(content_type: Option<&str>, filename: &str) -> HeaderMap {
    let content_type = content_type
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| HeaderValue::from_str(value).ok())
        .unwrap_or_else(|| HeaderValue::from_static(OCTET_STREAM));
    let disposition = HeaderValue::from_str(&attachment_disposition(filename))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, content_type);
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::{Cursor, Read};

    use axum::http::StatusCode;

    use super::*;
    use crate::api::{ApiError, ListingPage, PublicResourceApi, ResourceItem};
    use crate::link::LinkValidator;
    use crate::test_support::StubApi;
    use crate::web::flash::{FLASH_COOKIE, FlashLevel};

    const KEY: &str = "https://disk.yandex.ru/d/abc123";

    fn state_with(stub: StubApi) -> (Arc<StubApi>, Arc<AppState>) {
        let stub = Arc::new(stub);
        let api: Arc<dyn PublicResourceApi> = stub.clone();
        let state = AppState::new(api, LinkValidator::default(), 100, 4).unwrap();
        (stub, Arc::new(state))
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    fn flashes_of(response: &Response) -> Vec<Flash> {
        let jar = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|raw| axum_extra::extract::cookie::Cookie::parse_encoded(raw.to_string()).ok())
            .fold(CookieJar::new(), |jar, cookie| jar.add(cookie));
        let (_, flashes) = flash::take(jar);
        flashes
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    fn listing(total: u64) -> ListingPage {
        ListingPage {
            items: vec![
                ResourceItem::file("a.pdf", "/a.pdf", Some("application/pdf")),
                ResourceItem::file("b.jpg", "/b.jpg", Some("image/jpeg")),
                ResourceItem::folder("sub", "/sub"),
            ],
            total,
            limit: 100,
            offset: 0,
        }
    }

    #[tokio::test]
    async fn test_submit_link_empty_flashes_and_redirects_home() {
        let (_, state) = state_with(StubApi::new());
        let response = submit_link(
            State(state),
            CookieJar::new(),
            Ok(Form(LinkForm {
                public_key: Some("   ".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(MISSING_LINK_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_submit_link_invalid_never_calls_upstream() {
        let (stub, state) = state_with(StubApi::new());
        let response = submit_link(
            State(state),
            CookieJar::new(),
            Ok(Form(LinkForm {
                public_key: Some("https://example.com/d/abc".to_string()),
            })),
        )
        .await;

        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_LINK_MESSAGE)]);
        assert_eq!(stub.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_link_valid_redirects_to_first_page() {
        let (_, state) = state_with(StubApi::new());
        let response = submit_link(
            State(state),
            CookieJar::new(),
            Ok(Form(LinkForm {
                public_key: Some(KEY.to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            location(&response),
            "/files?public_key=https%3A%2F%2Fdisk.yandex.ru%2Fd%2Fabc123"
        );
    }

    #[tokio::test]
    async fn test_files_renders_filtered_page() {
        let (stub, state) = state_with(StubApi::new().with_listing(Ok(listing(250))));
        let response = files(
            State(state),
            CookieJar::new(),
            Ok(Query(FilesQuery {
                public_key: Some(KEY.to_string()),
                page: Some("abc".to_string()),
                file_type: Some("image".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.contains("b.jpg"));
        assert!(!html.contains("a.pdf"));
        assert!(html.contains("page=2&amp;file_type=image"), "next link expected");
        assert_eq!(stub.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_files_upstream_error_redirects_home_with_flash() {
        let stub = StubApi::new().with_listing(Err(ApiError::http(
            "https://api.example/resources",
            404,
            "Resource not found.",
        )));
        let (_, state) = state_with(stub);
        let response = files(
            State(state),
            CookieJar::new(),
            Ok(Query(FilesQuery {
                public_key: Some(KEY.to_string()),
                ..FilesQuery::default()
            })),
        )
        .await;

        assert_eq!(location(&response), "/");
        let flashes = flashes_of(&response);
        assert_eq!(flashes.len(), 1);
        assert_eq!(flashes[0].message, "HTTP error occurred: 404 Resource not found.");
    }

    #[tokio::test]
    async fn test_download_missing_params_redirects_home() {
        let (stub, state) = state_with(StubApi::new());
        let response = download(
            State(state),
            CookieJar::new(),
            Ok(Query(DownloadQuery {
                public_key: Some(KEY.to_string()),
                file_path: None,
            })),
        )
        .await;

        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_DOWNLOAD_MESSAGE)]);
        assert_eq!(stub.link_calls(), 0);
    }

    #[tokio::test]
    async fn test_download_serves_attachment() {
        let (_, state) = state_with(StubApi::new().with_file("/docs/отчёт.pdf", b"%PDF"));
        let response = download(
            State(state),
            CookieJar::new(),
            Ok(Query(DownloadQuery {
                public_key: Some(KEY.to_string()),
                file_path: Some("/docs/отчёт.pdf".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\""));
        assert!(disposition.contains("filename*=UTF-8''"));
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/octet-stream"
        );
        assert_eq!(body_bytes(response).await, b"%PDF");
    }

    #[tokio::test]
    async fn test_download_failure_redirects_to_listing() {
        let (stub, state) = state_with(StubApi::new());
        let response = download(
            State(state),
            CookieJar::new(),
            Ok(Query(DownloadQuery {
                public_key: Some(KEY.to_string()),
                file_path: Some("/missing.txt".to_string()),
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).starts_with("/files?public_key="));
        let flashes = flashes_of(&response);
        assert_eq!(flashes[0].level, FlashLevel::Danger);
        assert!(flashes[0].message.contains("/missing.txt"));
        assert_eq!(stub.content_calls(), 0);
    }

    #[tokio::test]
    async fn test_download_multiple_without_selection_warns() {
        let (stub, state) = state_with(StubApi::new());
        let response = download_multiple(
            State(state),
            CookieJar::new(),
            Ok(Form(MultiDownloadForm {
                public_key: Some(KEY.to_string()),
                file_paths: vec![String::new()],
            })),
        )
        .await;

        assert!(location(&response).starts_with("/files?public_key="));
        assert_eq!(flashes_of(&response), vec![Flash::warning(NO_SELECTION_MESSAGE)]);
        assert_eq!(stub.link_calls(), 0);
    }

    #[tokio::test]
    async fn test_download_multiple_partial_archive() {
        let stub = StubApi::new()
            .with_file("/a.txt", b"alpha")
            .with_file("/c.txt", b"gamma");
        let (_, state) = state_with(stub);
        let response = download_multiple(
            State(state),
            CookieJar::new(),
            Ok(Form(MultiDownloadForm {
                public_key: Some(KEY.to_string()),
                file_paths: vec!["/a.txt".into(), "/b.txt".into(), "/c.txt".into()],
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "application/zip");
        assert_eq!(response.headers().get(ARCHIVE_WARNINGS_HEADER).unwrap(), "1");
        let flashes = flashes_of(&response);
        assert_eq!(flashes.len(), 2);
        assert!(flashes[0].message.contains("/b.txt"));
        assert_eq!(flashes[1].message, "1 of 3 selected files could not be downloaded.");

        let bytes = body_bytes(response).await;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive.by_name("c.txt").unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "gamma");
    }

    #[tokio::test]
    async fn test_download_multiple_all_failed_redirects() {
        let (_, state) = state_with(StubApi::new());
        let response = download_multiple(
            State(state),
            CookieJar::new(),
            Ok(Form(MultiDownloadForm {
                public_key: Some(KEY.to_string()),
                file_paths: vec!["/x.txt".into(), "/y.txt".into()],
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let flashes = flashes_of(&response);
        assert_eq!(flashes.len(), 3);
        assert_eq!(flashes[2].level, FlashLevel::Danger);
        assert_eq!(flashes[2].message, "2 of 2 selected files could not be downloaded.");
    }

    #[tokio::test]
    async fn test_download_multiple_many_long_failures_fit_one_cookie() {
        let (_, state) = state_with(StubApi::new());
        let file_paths: Vec<String> = (0..12)
            .map(|i| format!("/{}/документ_{i}.pdf", "Очень длинная папка".repeat(8)))
            .collect();
        let response = download_multiple(
            State(state),
            CookieJar::new(),
            Ok(Form(MultiDownloadForm {
                public_key: Some(KEY.to_string()),
                file_paths,
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let set_cookie: Vec<&str> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(set_cookie.len(), 1);
        assert!(set_cookie[0].len() < 4096, "Set-Cookie is {} bytes", set_cookie[0].len());

        let flashes = flashes_of(&response);
        assert!(flashes.len() >= 2, "some per-path warnings survive");
        assert!(flashes[0].message.ends_with("(HTTP 404)"), "{}", flashes[0].message);
        assert_eq!(
            flashes.last().unwrap().message,
            "12 of 12 selected files could not be downloaded."
        );
    }

    #[tokio::test]
    async fn test_files_repeated_query_key_redirects_home() {
        let (stub, state) = state_with(StubApi::new().with_listing(Ok(listing(3))));
        let uri: axum::http::Uri = "/files?public_key=https%3A%2F%2Fdisk.yandex.ru%2Fd%2Fabc123&page=1&page=2"
            .parse()
            .unwrap();
        let query = Query::<FilesQuery>::try_from_uri(&uri);
        assert!(query.is_err());

        let response = files(State(state), CookieJar::new(), query).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_REQUEST_MESSAGE)]);
        assert_eq!(stub.list_calls(), 0);
    }

    #[tokio::test]
    async fn test_download_repeated_query_key_redirects_home() {
        let (stub, state) = state_with(StubApi::new());
        let uri: axum::http::Uri = "/download?file_path=%2Fa.txt&file_path=%2Fb.txt".parse().unwrap();
        let query = Query::<DownloadQuery>::try_from_uri(&uri);

        let response = download(State(state), CookieJar::new(), query).await;

        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_DOWNLOAD_MESSAGE)]);
        assert_eq!(stub.link_calls(), 0);
    }

    #[tokio::test]
    async fn test_submit_link_without_form_content_type_redirects_home() {
        use axum::extract::FromRequest;

        let (_, state) = state_with(StubApi::new());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from(format!("public_key={KEY}")))
            .unwrap();
        let form = Form::<LinkForm>::from_request(request, &()).await;
        assert!(form.is_err());

        let response = submit_link(State(state), CookieJar::new(), form).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_REQUEST_MESSAGE)]);
    }

    #[tokio::test]
    async fn test_download_multiple_without_form_content_type_redirects_home() {
        use axum::extract::FromRequest;

        let (stub, state) = state_with(StubApi::new());
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/download_multiple")
            .body(Body::from("file_paths=%2Fa.txt"))
            .unwrap();
        let form = Form::<MultiDownloadForm>::from_request(request, &()).await;

        let response = download_multiple(State(state), CookieJar::new(), form).await;

        assert_eq!(location(&response), "/");
        assert_eq!(flashes_of(&response), vec![Flash::danger(INVALID_REQUEST_MESSAGE)]);
        assert_eq!(stub.link_calls(), 0);
    }

    #[tokio::test]
    async fn test_index_consumes_flash_cookie() {
        let jar = flash::push(CookieJar::new(), [Flash::info("hello")]);
        let (jar, Html(html)) = index(jar).await;
        assert!(html.contains("hello"));
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_healthz() {
        assert_eq!(healthz().await, "ok");
    }
}
