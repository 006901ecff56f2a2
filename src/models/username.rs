//! Username derivation and validation.
//!
//! Usernames are generated once, on first sign-in, from the display name the
//! OAuth provider hands us. A [`Username`] can only be built through
//! [`derive_username`] or [`Username::parse`], so holding one means the value
//! satisfies the username pattern:
//!
//! - 8 to 20 characters
//! - ASCII letters, digits, `.` and `_` only
//! - no `.` or `_` as first or last character
//! - no two separators in a row

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const MIN_USERNAME_LENGTH: usize = 8;
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Filler used when a stripped display name is too short
const PAD_CHAR: char = '0';

// Alphanumeric runs joined by single separators. Length is checked separately.
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+(?:[._][a-zA-Z0-9]+)*$").expect("username pattern compiles"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsernameError {
    #[error("must be between 8 and 20 characters, got {0}")]
    Length(usize),

    #[error("only letters, digits, '.' and '_' allowed")]
    InvalidCharacters,

    #[error("cannot start or end with '.' or '_'")]
    SeparatorAtEdge,

    #[error("cannot contain consecutive '.' or '_'")]
    ConsecutiveSeparators,
}

/// Raised when a derived candidate fails the final pattern check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("generated username does not meet requirements")]
pub struct ValidationError {
    pub candidate: String,
    #[source]
    pub reason: UsernameError,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Accepts an existing username after checking it against the pattern.
    pub fn parse(s: impl Into<String>) -> Result<Self, UsernameError> {
        let s = s.into();
        validate_username(&s)?;
        Ok(Self(s))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Username> for String {
    fn from(u: Username) -> String {
        u.0
    }
}

/// Builds a username candidate from a free-form display name.
///
/// Everything but ASCII letters and digits is dropped and the rest is
/// lower-cased, then the result is padded with `0` up to 8 characters or cut
/// down to 20. The candidate is checked against the username pattern before it
/// is handed out.
///
/// ```
/// use prompt_share::models::username::derive_username;
///
/// assert_eq!(derive_username("John Doe").unwrap().as_str(), "johndoe0");
/// assert_eq!(derive_username("").unwrap().as_str(), "00000000");
/// ```
pub fn derive_username(display_name: &str) -> Result<Username, ValidationError> {
    let mut candidate: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if candidate.len() < MIN_USERNAME_LENGTH {
        let missing = MIN_USERNAME_LENGTH - candidate.len();
        candidate.extend(std::iter::repeat_n(PAD_CHAR, missing));
    } else if candidate.len() > MAX_USERNAME_LENGTH {
        // ASCII only at this point, byte index == char index
        candidate.truncate(MAX_USERNAME_LENGTH);
    }

    match validate_username(&candidate) {
        Ok(()) => Ok(Username(candidate)),
        Err(reason) => Err(ValidationError { candidate, reason }),
    }
}

/// Checks a string against the username pattern.
pub fn validate_username(s: &str) -> Result<(), UsernameError> {
    let len = s.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(UsernameError::Length(len));
    }
    if USERNAME_RE.is_match(s) {
        return Ok(());
    }

    if !s.chars().all(|c| c.is_ascii_alphanumeric() || is_separator(c)) {
        return Err(UsernameError::InvalidCharacters);
    }
    if s.starts_with(is_separator) || s.ends_with(is_separator) {
        return Err(UsernameError::SeparatorAtEdge);
    }
    Err(UsernameError::ConsecutiveSeparators)
}

#[inline]
fn is_separator(c: char) -> bool {
    matches!(c, '.' | '_')
}
