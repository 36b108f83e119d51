//! HTTP routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use plainpost::{Annotation, Hashtag, Normalizer, PlainText, Style};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

type SharedNormalizer = Arc<Normalizer>;

type Rejection = (StatusCode, Json<ErrorBody>);

pub fn router(normalizer: SharedNormalizer) -> Router {
    Router::new()
        .route("/format", post(format))
        .with_state(normalizer)
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Deserialize)]
pub struct FormatRequest {
    /// Editor HTML; missing means empty
    #[serde(default)]
    pub text: Option<String>,
    pub bold: Option<String>,
    pub rendering: Option<String>,
    #[serde(default)]
    pub annotate: bool,
}

#[derive(Debug, Serialize)]
pub struct FormatResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<HashtagBody>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<AnnotationBody>>,
}

/// A hashtag with its byte range in `text`
#[derive(Debug, Serialize)]
pub struct HashtagBody {
    pub tag: String,
    pub start: usize,
    pub end: usize,
}

/// An underline or strikethrough span, byte range in `text`
#[derive(Debug, Serialize)]
pub struct AnnotationBody {
    pub style: &'static str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn bad_request(error: impl ToString) -> Rejection {
    let error = error.to_string();
    warn!(%error, "rejected format request");
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error }))
}

async fn format(
    State(normalizer): State<SharedNormalizer>,
    payload: Result<Json<FormatRequest>, JsonRejection>,
) -> Result<Json<FormatResponse>, Rejection> {
    let Json(req) = payload.map_err(|rejection| bad_request(rejection.body_text()))?;

    let options = normalizer
        .options_with(req.bold.as_deref(), req.rendering.as_deref())
        .map_err(bad_request)?;
    let html = req.text.unwrap_or_default();

    let plain = normalizer
        .normalize_html_with(&html, &options)
        .map_err(bad_request)?;
    debug!(input = html.len(), output = plain.text.len(), "formatted");

    Ok(Json(respond(plain, req.annotate)))
}

fn respond(plain: PlainText, annotate: bool) -> FormatResponse {
    if !annotate {
        return FormatResponse {
            text: plain.text,
            hashtags: None,
            annotations: None,
        };
    }

    let hashtags = plain.hashtags.into_iter().map(hashtag_body).collect();
    let annotations = plain.annotations.into_iter().map(annotation_body).collect();
    FormatResponse {
        text: plain.text,
        hashtags: Some(hashtags),
        annotations: Some(annotations),
    }
}

fn hashtag_body(hashtag: Hashtag) -> HashtagBody {
    HashtagBody {
        tag: hashtag.tag,
        start: hashtag.range.start,
        end: hashtag.range.end,
    }
}

fn annotation_body(annotation: Annotation) -> AnnotationBody {
    AnnotationBody {
        style: style_name(annotation.style),
        start: annotation.range.start,
        end: annotation.range.end,
    }
}

fn style_name(style: Style) -> &'static str {
    match style {
        Style::Bold => "bold",
        Style::Italic => "italic",
        Style::Underline => "underline",
        Style::Strikethrough => "strikethrough",
        Style::Code => "code",
    }
}
