//! Web form for the two tools.
//!
//! Every request runs its pipeline on the blocking pool and keeps nothing
//! once the response is sent.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;

use pdfdesk::{
    merge_with_toc, pdf_to_docx, Error as PdfError, ExtractOptions, TocOptions, DOCX_MIME,
    PDF_MIME,
};

/// Settings for `pdfdesk serve`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
struct AppState {
    toc: TocOptions,
    extract: ExtractOptions,
}

// ============================================================================
// Error type
// ============================================================================

#[derive(Debug)]
struct AppError(StatusCode, String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.0, Html(error_page(self.0, &self.1))).into_response()
    }
}

impl From<PdfError> for AppError {
    fn from(err: PdfError) -> Self {
        let status = status_for(&err);
        if status.is_server_error() {
            log::error!("request failed: {}", err);
            AppError(status, "Something went wrong while processing the upload.".into())
        } else {
            log::info!("rejected upload: {}", err);
            AppError(status, err.to_string())
        }
    }
}

fn bad_request(msg: impl Into<String>) -> AppError {
    AppError(StatusCode::BAD_REQUEST, msg.into())
}

/// A body over the upload limit reports 413; anything else is a bad request.
fn upload_error(err: MultipartError) -> AppError {
    let status = err.status();
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        log::info!("rejected upload: {}", err.body_text());
        return AppError(status, "The upload is larger than this server accepts.".into());
    }
    bad_request(format!("Malformed upload: {}", err.body_text()))
}

fn worker_failed(err: tokio::task::JoinError) -> PdfError {
    PdfError::Other(format!("worker task failed: {}", err))
}

/// Status code reported for a library error.
fn status_for(err: &PdfError) -> StatusCode {
    match err {
        PdfError::EmptyUpload(_) => StatusCode::BAD_REQUEST,
        e if e.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Pages
// ============================================================================

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>pdfdesk</title>
<style>
body { font-family: sans-serif; max-width: 40rem; margin: 2rem auto; }
form { border: 1px solid #ccc; padding: 1rem; margin-bottom: 1.5rem; }
</style>
</head>
<body>
<h1>pdfdesk</h1>
<form action="/docx" method="post" enctype="multipart/form-data">
<h2>PDF to DOCX</h2>
<p>Extract the text of a PDF into a Word document.</p>
<input type="file" name="file" accept="application/pdf" required>
<button type="submit">Convert</button>
</form>
<form action="/merge" method="post" enctype="multipart/form-data">
<h2>Merge with table of contents</h2>
<p>Files are merged in the order they are selected.</p>
<input type="file" name="files" accept="application/pdf" multiple required>
<button type="submit">Merge</button>
</form>
</body>
</html>
"#;

fn error_page(status: StatusCode, message: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{} - pdfdesk</title></head>\n\
         <body>\n<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back</a></p>\n</body>\n</html>\n",
        status.as_u16(),
        html_escape::encode_text(status.canonical_reason().unwrap_or("Error")),
        html_escape::encode_text(message),
    )
}

/// `Content-Disposition` for a download, with an ASCII fallback name and
/// the exact name as RFC 5987 `filename*`.
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect();
    if file_name.is_ascii() && fallback == file_name {
        return format!("attachment; filename=\"{}\"", fallback);
    }
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(file_name)
    )
}

fn download(mime: &str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (header::CONTENT_DISPOSITION, content_disposition(file_name)),
        ],
        bytes,
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// A file part of a multipart upload.
struct Upload {
    name: String,
    data: Vec<u8>,
}

/// Collect the file parts named `field`, in the order they were sent.
async fn read_uploads(multipart: &mut Multipart, field: &str) -> Result<Vec<Upload>, AppError> {
    let mut uploads = Vec::new();
    while let Some(part) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if part.name() != Some(field) {
            continue;
        }
        let name = part
            .file_name()
            .filter(|n| !n.is_empty())
            .unwrap_or("upload.pdf")
            .to_string();
        let data = part.bytes().await.map_err(upload_error)?;
        if data.is_empty() {
            continue;
        }
        uploads.push(Upload {
            name,
            data: data.to_vec(),
        });
    }
    Ok(uploads)
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

// POST /docx
async fn docx_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_uploads(&mut multipart, "file")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| bad_request("Please choose a PDF file to convert."))?;
    log::info!("docx: {} ({} bytes)", upload.name, upload.data.len());

    let options = state.extract.clone();
    let docx = tokio::task::spawn_blocking(move || pdf_to_docx(&upload.name, &upload.data, options))
        .await
        .map_err(worker_failed)??;

    Ok(download(DOCX_MIME, &docx.file_name, docx.bytes))
}

// POST /merge
async fn merge_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let uploads = read_uploads(&mut multipart, "files").await?;
    if uploads.is_empty() {
        return Err(bad_request("Please choose at least one PDF file to merge."));
    }
    log::info!("merge: {} files", uploads.len());

    let options = state.toc.clone();
    let pairs: Vec<(String, Vec<u8>)> = uploads.into_iter().map(|u| (u.name, u.data)).collect();
    let merged = tokio::task::spawn_blocking(move || merge_with_toc(pairs, &options))
        .await
        .map_err(worker_failed)??;

    Ok(download(PDF_MIME, &merged.file_name, merged.bytes))
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Server
// ============================================================================

fn router(config: &ServerConfig) -> Router {
    let state = AppState {
        toc: TocOptions::default(),
        extract: ExtractOptions::default(),
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/docx", post(docx_handler))
        .route("/merge", post(merge_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

/// Bind and serve until ctrl-c.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    log::info!(
        "listening on {} (uploads up to {} bytes)",
        config.bind,
        config.max_upload_bytes
    );
    println!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}
