use crate::{RawPost, SourceError};

/// Boundary to whatever fetches raw posts for an account.
///
/// Implementations own their transport, retries, and timeouts. Every
/// failure is reported as a [`SourceError`] so nothing else crosses into
/// the analysis engine.
pub trait PostSource {
    /// Fetch up to `limit` raw posts for `account`, in source order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the account cannot be read or parsed.
    fn fetch(&self, account: &str, limit: Option<usize>) -> Result<Vec<RawPost>, SourceError>;
}

/// Trim whitespace and a single leading `@` from an account name.
#[must_use]
pub fn normalize_account_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('@').unwrap_or(trimmed).trim().to_string()
}
