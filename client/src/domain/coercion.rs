//! Form value coercion.
//!
//! Forms hold raw text. Before a request is built the text is coerced into
//! typed values: integer ids and UTC timestamps. That is the only validation
//! the client performs.

use std::str::FromStr;

use thiserror::Error;

/// Raised when a raw form value cannot be coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    /// The text is neither an RFC 3339 timestamp nor a `datetime-local` value.
    #[error("{field} is not a valid date-time: {input:?}")]
    InvalidTimestamp {
        /// Wire name of the field being coerced.
        field: &'static str,
        /// The raw text as entered.
        input: String,
    },
    /// The wall-clock time falls in a gap of the viewer's time zone.
    #[error("{field} does not exist in the local time zone: {input:?}")]
    NonexistentLocalTime {
        /// Wire name of the field being coerced.
        field: &'static str,
        /// The raw text as entered.
        input: String,
    },
    /// The text is not an integer id.
    #[error("{field} is not a valid id: {input:?}")]
    InvalidId {
        /// Wire name of the field being coerced.
        field: &'static str,
        /// The raw text as entered.
        input: String,
    },
}

/// Coerce an optional select value into an id.
///
/// A blank selection yields `None`.
///
/// # Examples
/// ```
/// use event_board::domain::{UserId, coerce_optional_id};
///
/// let id: Option<UserId> = coerce_optional_id("createdBy", "4").expect("valid id");
/// assert_eq!(id, Some(UserId::new(4)));
/// assert_eq!(coerce_optional_id::<UserId>("createdBy", "  ").expect("blank"), None);
/// ```
pub fn coerce_optional_id<I: FromStr>(
    field: &'static str,
    input: &str,
) -> Result<Option<I>, CoercionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<I>()
        .map(Some)
        .map_err(|_| CoercionError::InvalidId {
            field,
            input: input.to_owned(),
        })
}
