use reqwest::{Response, StatusCode};

/// Passes successful responses through and turns all others into the error built by
/// `unexpected_status` from the status and the response body.
pub async fn error_for_status<E>(
    response: Response,
    unexpected_status: impl FnOnce(StatusCode, String) -> E,
) -> Result<Response, E> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(unexpected_status(status, body))
}
