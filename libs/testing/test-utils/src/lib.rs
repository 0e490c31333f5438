//! Shared test utilities for the product catalog crates
//!
//! - `TestDatabase`: PostgreSQL container with migrations applied (feature: "postgres")
//! - `TestDataBuilder`: deterministic test data
//! - `assertions`: small assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let builder = TestDataBuilder::from_test_name("my_test");
//!
//!     let name = builder.name("widget", "main");
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Builder for deterministic test data
///
/// Seeding from the test name keeps names unique across tests sharing a
/// database while staying reproducible between runs.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of `name`.
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::from_test_name("test_create_product");
    /// ```
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// `test-{prefix}-{seed}-{suffix}`
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let builder = TestDataBuilder::new(7);
    /// assert_eq!(builder.name("widget", "main"), "test-widget-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{}-{}-{}", prefix, self.seed, suffix)
    }

    /// A description long enough to pass product validation.
    pub fn description(&self, subject: &str) -> String {
        format!("Test fixture for {} (seed {})", subject, self.seed)
    }

    /// Stock quantity in `0..1000`, fixed per seed.
    pub fn quantity(&self) -> i32 {
        (self.seed % 1000) as i32
    }
}

/// Test assertion helpers
pub mod assertions {
    use std::fmt::Debug;

    /// Assert that an id matches, naming the context on failure
    pub fn assert_id_eq<T: PartialEq + Debug>(actual: T, expected: T, context: &str) {
        assert_eq!(
            actual, expected,
            "{}: expected id {:?}, got {:?}",
            context, expected, actual
        );
    }

    /// Unwrap a `Some`, panicking with `context` otherwise
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_builder_deterministic() {
        let builder1 = TestDataBuilder::new(42);
        let builder2 = TestDataBuilder::new(42);

        assert_eq!(builder1.quantity(), builder2.quantity());
        assert_eq!(
            builder1.name("widget", "test"),
            builder2.name("widget", "test")
        );
    }

    #[test]
    fn test_data_builder_different_names() {
        let builder1 = TestDataBuilder::from_test_name("test1");
        let builder2 = TestDataBuilder::from_test_name("test2");

        assert_ne!(builder1.name("widget", "a"), builder2.name("widget", "a"));
    }

    #[test]
    fn test_description_is_long_enough() {
        let builder = TestDataBuilder::new(0);
        assert!(builder.description("x").chars().count() >= 10);
    }

    #[test]
    fn test_quantity_is_non_negative() {
        let builder = TestDataBuilder::new(u64::MAX);
        assert!((0..1000).contains(&builder.quantity()));
    }
}
