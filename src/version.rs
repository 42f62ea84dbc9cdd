//! Version information for courselens, taken from Cargo.toml at build time.

/// The version of courselens
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the application
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// The description of the application
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get the full version string
pub fn full_version() -> String {
    format!("{} v{}", APP_NAME, VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constants() {
        assert!(!VERSION.is_empty());
        assert_eq!(APP_NAME, "courselens");
        assert!(!APP_DESCRIPTION.is_empty());
    }

    #[test]
    fn test_full_version() {
        let full = full_version();
        assert!(full.starts_with(APP_NAME));
        assert!(full.ends_with(VERSION));
    }
}
