//! Cursor codec and `Link` header, matching the generated pagination
//! package.
//!
//! A cursor is `<sort value>\x1f<id>` in URL-safe base64 without padding.
//! The id is everything after the last separator, so sort values may
//! contain the separator but ids may not.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use thiserror::Error;

pub const CURSOR_SEPARATOR: char = '\x1f';

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor is not valid base64")]
    Encoding,
    #[error("cursor is malformed")]
    Malformed,
}

/// Position just past the last row of a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cursor {
    pub sort: String,
    pub id: String,
}

impl Cursor {
    pub fn new(sort: impl Into<String>, id: impl Into<String>) -> Self {
        Cursor {
            sort: sort.into(),
            id: id.into(),
        }
    }

    pub fn encode(&self) -> String {
        let raw = format!("{}{CURSOR_SEPARATOR}{}", self.sort, self.id);
        URL_SAFE_NO_PAD.encode(raw)
    }

    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CursorError::Encoding)?;
        let raw = String::from_utf8(bytes).map_err(|_| CursorError::Malformed)?;
        let (sort, id) = raw
            .rsplit_once(CURSOR_SEPARATOR)
            .ok_or(CursorError::Malformed)?;
        if id.is_empty() {
            return Err(CursorError::Malformed);
        }
        Ok(Cursor::new(sort, id))
    }
}

/// RFC 8288 `Link` header for the page after `url`, present only when more
/// rows remain.
pub fn link_header(url: &str, next: &Cursor, has_more: bool) -> Option<String> {
    if !has_more {
        return None;
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    Some(format!(
        "<{url}{separator}cursor={}>; rel=\"next\"",
        next.encode()
    ))
}
