use crate::error::{Error, Result};
use hyper::HeaderMap;

/// Header carrying the opaque ID of the authenticated user, as set by the upstream gateway.
pub const USER_ID: &str = "x-user-id";

/// Header carrying the display name of the authenticated user.
pub const USER_NAME: &str = "x-user-name";

/// Fallback display name for users without one.
pub const ANONYMOUS: &str = "Anonymous";

#[derive(Debug, PartialEq, Eq)]
pub struct User<'h> {
    pub id: &'h str,
    pub name: &'h str,
}

/// Extracts the caller's identity from a map of headers.
pub fn extract_user(headers: &HeaderMap) -> Result<User<'_>> {
    let id = headers
        .get(USER_ID)
        .ok_or(Error::MissingUser)?
        .to_str()
        .map_err(|_| Error::MissingUser)?
        .trim();
    if id.is_empty() {
        return Err(Error::MissingUser);
    }

    let name = headers
        .get(USER_NAME)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(ANONYMOUS);
    Ok(User { id, name })
}
