/// Get environment variable with ANTEROOM_ prefix, falling back to unprefixed version
///
/// This helper function checks for `ANTEROOM_{key}` first, then falls back to `{key}`
/// for compatibility with standard environment variable naming.
///
/// # Examples
///
/// ```rust
/// use anteroom::utils::get_env_with_prefix;
///
/// // Checks ANTEROOM_PLATFORM first, then PLATFORM
/// let platform = get_env_with_prefix("PLATFORM");
///
/// // Checks ANTEROOM_LOG_LEVEL first, then LOG_LEVEL
/// let level = get_env_with_prefix("LOG_LEVEL");
/// ```
pub fn get_env_with_prefix(key: &str) -> Option<String> {
    std::env::var(format!("ANTEROOM_{}", key))
        .or_else(|_| std::env::var(key))
        .ok()
}
