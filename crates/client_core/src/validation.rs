use url::Url;

use crate::error::ClientError;

pub const EMPTY_URL_MESSAGE: &str = "Please enter a video URL";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL";

/// Checks user input before anything goes on the wire. Accepts only absolute
/// URLs that carry both a scheme and a host.
pub fn validate_video_url(input: &str) -> Result<Url, ClientError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation(EMPTY_URL_MESSAGE));
    }

    let url = Url::parse(trimmed).map_err(|_| ClientError::validation(INVALID_URL_MESSAGE))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ClientError::validation(INVALID_URL_MESSAGE));
    }

    Ok(url)
}
