use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::{Error, ProtocolError};

/// Interprets the status line of a range response.
///
/// `200 OK` lets the caller go on to scan the body. `429 Too Many Requests`
/// becomes [`Error::RateLimited`] carrying the `retry-after` delay in seconds.
/// Any other status is [`Error::UnexpectedStatus`].
pub fn check_status(status: StatusCode, headers: &HeaderMap) -> Result<(), Error> {
    if status == StatusCode::OK {
        return Ok(());
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let value = headers
            .get(RETRY_AFTER)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();
        let retry_in = match value.trim().parse::<u64>() {
            Ok(seconds) => seconds,
            Err(_) => return Err(ProtocolError::RetryAfter { value }.into()),
        };
        return Err(Error::RateLimited { retry_in });
    }

    Err(Error::UnexpectedStatus { status })
}
