//! Response classification
//!
//! Maps a transport outcome to a typed result. The status map is total:
//! every received response lands on a success or on exactly one error
//! variant, with statuses outside the documented set collected under
//! [`Error::UnexpectedStatus`].

use super::transport::ApiResponse;
use crate::error::{Error, Result};

/// Classify a transport outcome
///
/// Transport failures propagate as-is; they are never mapped onto the
/// status-based variants. With `skip_error_handling` set, a received
/// response is returned untouched, status uninspected.
pub fn classify(outcome: Result<ApiResponse>, skip_error_handling: bool) -> Result<ApiResponse> {
    let response = outcome?;
    if skip_error_handling {
        return Ok(response);
    }
    classify_status(response)
}

/// Map a received response by status
fn classify_status(response: ApiResponse) -> Result<ApiResponse> {
    match response.status {
        199..=399 => Ok(response),
        400 => Err(Error::BadRequest {
            body: response.body_text(),
        }),
        403 => Err(Error::Unauthenticated {
            body: response.body_text(),
        }),
        404 => Err(Error::NotFound {
            body: response.body_text(),
        }),
        418 => Err(Error::IpBanned {
            body: response.body_text(),
        }),
        429 => Err(Error::UsageLimitReached {
            body: response.body_text(),
        }),
        500 => Err(Error::InternalServerError {
            body: response.body_text(),
        }),
        status => Err(Error::UnexpectedStatus {
            status,
            body: response.body_text(),
        }),
    }
}
