//! Defines the app level error type and conversions to rendered HTML pages.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{html::error_view, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A chart was asked to show zero buckets.
    ///
    /// At least one bucket is needed to hold the folded "others" entry, so
    /// callers must pass a bucket count of one or more.
    #[error("the number of chart buckets must be at least 1, got {0}")]
    InvalidBucketCount(usize),

    /// The time window tag is not one of "30d", "90d" or "1y".
    #[error("unknown time window \"{0}\"")]
    UnknownWindow(String),

    /// The chart kind tag is not one of "pie" or "bar".
    #[error("unknown chart kind \"{0}\"")]
    UnknownChartKind(String),

    /// The balance chart style tag is not one of "area" or "line".
    #[error("unknown balance chart style \"{0}\"")]
    UnknownBalanceStyle(String),

    /// The currency code is not a known ISO 4217 code.
    #[error("unknown currency code \"{0}\"")]
    UnknownCurrency(String),

    /// The locale has no known number formatting conventions.
    #[error("unknown locale \"{0}\"")]
    UnknownLocale(String),

    /// The minimum number of fraction digits is larger than the maximum.
    #[error("minimum fraction digits ({min}) cannot exceed maximum fraction digits ({max})")]
    InvalidFractionDigits {
        /// The requested minimum.
        min: u8,
        /// The requested maximum.
        max: u8,
    },

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::UnknownWindow(_)
            | Error::UnknownChartKind(_)
            | Error::UnknownBalanceStyle(_) => {
                let description = self.to_string();
                let page = error_view(
                    "Requête invalide",
                    "400",
                    &description,
                    "Vérifiez les paramètres de l'adresse et réessayez.",
                );

                (StatusCode::BAD_REQUEST, page).into_response()
            }
            Error::InvalidTimezone(timezone) => InternalServerError {
                description: "Fuseau horaire invalide",
                fix: &format!(
                    "Impossible de trouver le fuseau horaire \"{timezone}\". Vérifiez la \
                    configuration du serveur et utilisez un nom canonique, par exemple \
                    \"Europe/Paris\"."
                ),
            }
            .into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
