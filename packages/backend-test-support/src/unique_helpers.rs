//! Test helpers for generating unique test data
//!
//! ULID-based helpers keep test rooms and players from colliding across
//! test runs sharing a store.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("player");
/// let id2 = unique_str("player");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique room name, truncated to the server's 24-char limit.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_room_name;
///
/// let a = unique_room_name();
/// let b = unique_room_name();
/// assert_ne!(a, b);
/// assert!(a.len() <= 24);
/// ```
pub fn unique_room_name() -> String {
    let mut name = format!("r-{}", Ulid::new().to_string().to_lowercase());
    name.truncate(24);
    name
}
