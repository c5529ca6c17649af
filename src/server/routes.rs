use axum::{
    extract::{Query, State},
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use crate::server::AppState;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct VerseParams {
    pub version: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<String>,
    pub verse: Option<String>,
}

/// A fully specified lookup, validated before the store is touched
struct VerseLookup {
    version: String,
    book: String,
    chapter: String,
    verse: String,
    chapter_num: u32,
    verse_num: u32,
}

impl VerseParams {
    fn into_lookup(self) -> Result<VerseLookup, ApiError> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        let (Some(version), Some(book), Some(chapter), Some(verse)) = (
            present(self.version),
            present(self.book),
            present(self.chapter),
            present(self.verse),
        ) else {
            return Err(api_error(StatusCode::BAD_REQUEST, "Missing required parameters"));
        };

        let chapter_num = chapter
            .parse::<u32>()
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, "chapter must be a non-negative integer"))?;
        let verse_num = verse
            .parse::<u32>()
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, "verse must be a non-negative integer"))?;

        Ok(VerseLookup {
            version,
            book,
            chapter,
            verse,
            chapter_num,
            verse_num,
        })
    }
}

/// Body of a successful verse lookup; request values are echoed as given
#[derive(Debug, Serialize, Deserialize)]
pub struct VerseResponse {
    pub version: String,
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

pub async fn get_verse(
    State(state): State<Arc<AppState>>,
    Query(params): Query<VerseParams>,
) -> Result<Json<VerseResponse>, ApiError> {
    tracing::info!(?params, "Received verse request");

    let lookup = params.into_lookup().inspect_err(|(_, Json(body))| {
        tracing::info!("Rejected verse request: {}", body.error);
    })?;

    let found = {
        let store = state.store.lock().await;
        store.find_verse(&lookup.version, &lookup.book, lookup.chapter_num, lookup.verse_num)
    };

    match found {
        Ok(Some(record)) => {
            tracing::info!("Sending {} {}:{}", lookup.book, lookup.chapter, lookup.verse);
            Ok(Json(VerseResponse {
                version: lookup.version,
                book: lookup.book,
                chapter: lookup.chapter,
                verse: lookup.verse,
                text: record.text,
            }))
        }
        Ok(None) => {
            tracing::info!("Verse not found: {} {}:{}", lookup.book, lookup.chapter, lookup.verse);
            Err(api_error(StatusCode::NOT_FOUND, "Verse not found"))
        }
        Err(e) => {
            tracing::error!("Database error: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
        }
    }
}

pub async fn get_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let books = {
        let store = state.store.lock().await;
        store.list_books()
    };

    match books {
        Ok(books) => {
            tracing::info!("Sending {} books", books.len());
            Ok(Json(books))
        }
        Err(e) => {
            tracing::error!("Database error: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"))
        }
    }
}
