//! Identifier helpers.
//!
//! Jot uses UUIDv7 identifiers (RFC 9562): the leading 48 bits are a
//! millisecond timestamp, so ids generated later sort greater. Listings
//! ordered by creation time can therefore use the id as a stable tie-break
//! for records created within the same millisecond.

use uuid::Uuid;

use crate::error::{Error, Result};

/// Generate a new UUIDv7 identifier.
#[inline]
pub fn new_id() -> Uuid {
    Uuid::now_v7()
}

/// Parse an identifier supplied by a caller.
///
/// Format is checked before any store lookup, so a malformed id fails with
/// [`Error::InvalidReference`] rather than surfacing as a store-level error.
pub fn parse_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Error::InvalidReference(raw.to_string()))
}
