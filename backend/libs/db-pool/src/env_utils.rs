//! Environment variable parsing helpers for pool settings.

use std::str::FromStr;

/// Parse an environment variable, falling back to `default` when it is
/// missing or does not parse.
pub fn parse_env_with_default<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn falls_back_on_garbage() {
        std::env::set_var("DB_POOL_TEST_VALUE", "not-a-number");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 7);
        std::env::set_var("DB_POOL_TEST_VALUE", "12");
        assert_eq!(parse_env_with_default("DB_POOL_TEST_VALUE", 7u32), 12);
        std::env::remove_var("DB_POOL_TEST_VALUE");
    }
}
