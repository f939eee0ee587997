//! Test-only helpers that start disposable infrastructure for integration tests.

pub mod postgres;
pub mod runtime;

use ulid::Ulid;

pub(crate) fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new().to_string().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::unique_name;

    #[test]
    fn unique_names_differ_and_keep_prefix() {
        let first = unique_name("postgres");
        let second = unique_name("postgres");
        assert!(first.starts_with("postgres-"));
        assert_ne!(first, second);
    }
}
