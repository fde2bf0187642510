// src/presentation/http/controllers/mod.rs
pub mod activity_logs;
pub mod auth;
pub mod catalog;
pub mod events;
pub mod posts;
pub mod roles;
pub mod users;

use crate::application::export::CsvFile;
use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};

/// A CSV download response: `text/csv` with an attachment filename.
pub(crate) fn csv_response(file: CsvFile) -> Response {
    (
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response()
}

/// Distinguishes an explicit JSON `null` (clear the field) from an absent
/// key (leave it alone) when paired with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
