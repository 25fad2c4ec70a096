//! Environment variable handling.

use std::env;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable as a u64.
pub fn get_u64(name: &str) -> Option<u64> {
    get_var(name).and_then(|v| v.parse().ok())
}

/// Environment variable names understood by WowNow.
pub mod vars {
    /// Path of the config file.
    pub const CONFIG: &str = "WOWNOW_CONFIG";

    /// Path of the local storage file.
    pub const STORE: &str = "WOWNOW_STORE";

    /// Origin identifier mixed into the storage key.
    pub const ORIGIN: &str = "WOWNOW_ORIGIN";

    /// Passphrase mixed into the storage key.
    pub const PASSPHRASE: &str = "WOWNOW_PASSPHRASE";

    /// Storage quota in bytes.
    pub const QUOTA: &str = "WOWNOW_STORE_QUOTA";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_var_missing() {
        assert!(get_var("WOWNOW_TEST_DEFINITELY_UNSET_VAR").is_none());
    }

    #[test]
    fn test_get_u64_parses() {
        env::set_var("WOWNOW_TEST_U64_VAR", "4096");
        assert_eq!(get_u64("WOWNOW_TEST_U64_VAR"), Some(4096));
        env::set_var("WOWNOW_TEST_U64_VAR", "lots");
        assert_eq!(get_u64("WOWNOW_TEST_U64_VAR"), None);
        env::remove_var("WOWNOW_TEST_U64_VAR");
    }
}
