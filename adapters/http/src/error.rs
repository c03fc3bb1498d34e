use std::{io, num::ParseIntError, path::PathBuf};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use life_core::GridError;
use thiserror::Error;
use tracing::error;

use crate::{MAX_FILL, MIN_FILL};

/// Failures surfaced by the HTTP adapter.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A client requested a fill outside the accepted range.
    #[error("fill {0} out of range {min}..={max}", min = MIN_FILL, max = MAX_FILL)]
    FillOutOfRange(i32),
    /// The fill file could not be read or written.
    #[error("could not access fill file {}: {source}", path.display())]
    FillConfig {
        /// File that triggered the failure.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The fill file does not hold a percentage.
    #[error("fill file {} holds {contents:?}, expected a percentage", path.display())]
    FillParse {
        /// File that triggered the failure.
        path: PathBuf,
        /// Raw file contents.
        contents: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },
    /// The fill file holds a percentage outside the accepted range.
    #[error(
        "fill file {} holds {fill}, expected {min}..={max}",
        path.display(),
        min = MIN_FILL,
        max = MAX_FILL
    )]
    StoredFillOutOfRange {
        /// File that triggered the failure.
        path: PathBuf,
        /// Rejected value.
        fill: i32,
    },
    /// The configured grid size is invalid.
    #[error(transparent)]
    Grid(#[from] GridError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::FillOutOfRange(_) => StatusCode::BAD_REQUEST,
            Self::FillConfig { .. }
            | Self::FillParse { .. }
            | Self::StoredFillOutOfRange { .. }
            | Self::Grid(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, self.to_string()).into_response()
    }
}
