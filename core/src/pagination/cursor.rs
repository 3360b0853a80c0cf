//! Opaque continuation marker for keyset pagination

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

use crate::errors::PaginationError;

/// Position in the `(created_at, id)` order of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Cursor {
    pub fn new(id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self { id, created_at }
    }

    /// Encode into an opaque URL-safe string
    pub fn encode(&self) -> String {
        CursorCodec::encode(self.id, self.created_at)
    }

    /// Decode a string produced by [`Cursor::encode`]
    pub fn decode(raw: &str) -> Result<Self, PaginationError> {
        CursorCodec::decode(raw)
    }
}

impl Ord for Cursor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Cursor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Encoder/decoder for pagination cursors
///
/// Payload is `<seconds>.<nanoseconds>|<uuid>` in unpadded base64url, which
/// covers the whole `DateTime<Utc>` range without loss.
pub struct CursorCodec;

impl CursorCodec {
    pub fn encode(id: Uuid, created_at: DateTime<Utc>) -> String {
        let payload = format!(
            "{}.{:09}|{}",
            created_at.timestamp(),
            created_at.timestamp_subsec_nanos(),
            id.hyphenated()
        );
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    }

    pub fn decode(raw: &str) -> Result<Cursor, PaginationError> {
        if raw.is_empty() {
            return Err(PaginationError::invalid("empty cursor"));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|_| PaginationError::invalid("invalid cursor encoding"))?;
        let payload = std::str::from_utf8(&bytes)
            .map_err(|_| PaginationError::invalid("invalid cursor encoding"))?;

        let (timestamp, id) = payload
            .split_once('|')
            .ok_or_else(|| PaginationError::invalid("invalid cursor format"))?;
        let (secs, nanos) = timestamp
            .split_once('.')
            .ok_or_else(|| PaginationError::invalid("invalid cursor timestamp"))?;

        if nanos.len() != 9 || !nanos.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PaginationError::invalid("invalid cursor timestamp"));
        }
        let secs: i64 = secs
            .parse()
            .map_err(|_| PaginationError::invalid("invalid cursor timestamp"))?;
        let nanos: u32 = nanos
            .parse()
            .map_err(|_| PaginationError::invalid("invalid cursor timestamp"))?;
        let created_at = DateTime::from_timestamp(secs, nanos)
            .ok_or_else(|| PaginationError::invalid("cursor timestamp out of range"))?;

        let id = Uuid::try_parse(id).map_err(|_| PaginationError::invalid("invalid cursor uuid"))?;

        Ok(Cursor { id, created_at })
    }
}
