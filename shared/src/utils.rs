//! # Shared Utility Functions
//!
//! Display helpers used by every LiFit front end.
//!
//! - [`format_count`] - Compact counters ("1.2 mil")
//! - [`format_handle`] - `@username` with a placeholder for missing names
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_count, format_handle};
//!
//! assert_eq!(format_count(1500), "1.5 mil");
//! assert_eq!(format_handle("ana"), "@ana");
//! ```

/// Format a like/comment/follower count the way the app shows it.
///
/// Values below 1000 are printed as-is. Larger values are divided by 1000,
/// rounded to one decimal, and suffixed with `mil`; a trailing `.0` is dropped.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(1000), "1 mil");
/// assert_eq!(format_count(12_340), "12.3 mil");
/// ```
pub fn format_count(count: u32) -> String {
    if count < 1000 {
        return count.to_string();
    }
    let thousands = format!("{:.1}", f64::from(count) / 1000.0);
    let trimmed = thousands.strip_suffix(".0").unwrap_or(&thousands);
    format!("{} mil", trimmed)
}

/// Format a username as a handle, falling back to `@usuario` when empty.
pub fn format_handle(username: &str) -> String {
    let username = username.trim();
    if username.is_empty() {
        "@usuario".to_string()
    } else {
        format!("@{}", username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(42), "42");
        assert_eq!(format_count(1000), "1 mil");
        assert_eq!(format_count(1049), "1 mil");
        assert_eq!(format_count(2500), "2.5 mil");
    }

    #[test]
    fn test_format_handle() {
        assert_eq!(format_handle("bia"), "@bia");
        assert_eq!(format_handle("  "), "@usuario");
    }
}
