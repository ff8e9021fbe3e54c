// SPDX-License-Identifier: Apache-2.0

use crate::{ApiError, ApiErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiErrorMapping {
    pub status_code: u16,
    pub retryable: bool,
}

#[must_use]
pub fn map_error(error: &ApiError) -> ApiErrorMapping {
    let status_code = match error.code {
        ApiErrorCode::ValidationFailed
        | ApiErrorCode::InvalidJsonBody
        | ApiErrorCode::ProtectedList => 400,
        ApiErrorCode::ListNotFound | ApiErrorCode::TaskNotFound | ApiErrorCode::RouteNotFound => {
            404
        }
        ApiErrorCode::PayloadTooLarge => 413,
        ApiErrorCode::StoreUnavailable | ApiErrorCode::Internal => 500,
    };

    ApiErrorMapping {
        status_code,
        retryable: matches!(error.code, ApiErrorCode::StoreUnavailable),
    }
}
