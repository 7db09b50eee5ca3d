use uuid::Uuid;

/// `{prefix}-{uuid}`, for player ids that must not collide across tests.
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("player");
/// assert_ne!(a, unique_str("player"));
/// assert!(a.starts_with("player-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
