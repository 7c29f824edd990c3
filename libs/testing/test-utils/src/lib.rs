//! Helpers shared by the domain crates' tests.
//!
//! - [`TestDatabase`]: throwaway PostgreSQL with the sales schema
//!   (feature `postgres`, on by default)
//! - [`TestDataBuilder`]: unique product names and user emails per test
//! - [`assertions`]: assertion helpers with readable failure messages
//!
//! ```rust,no_run
//! use test_utils::{TestDataBuilder, TestDatabase};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let data = TestDataBuilder::from_test_name("create_product");
//! let name = data.name("product", "main"); // test-product-<seed>-main
//! let email = data.email("ana");           // ana-<seed>@example.com
//! # }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Produces values for UNIQUE columns that stay distinct between tests.
#[derive(Debug, Clone, Copy)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the test's name (FNV-1a), stable across runs.
    pub fn from_test_name(name: &str) -> Self {
        let seed = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        });
        Self::new(seed)
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).name("product", "main"), "test-product-7-main");
    /// ```
    pub fn name(&self, prefix: &str, suffix: &str) -> String {
        format!("test-{prefix}-{}-{suffix}", self.seed)
    }

    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// assert_eq!(TestDataBuilder::new(7).email("ana"), "ana-7@example.com");
    /// ```
    pub fn email(&self, local: &str) -> String {
        format!("{local}-{}@example.com", self.seed)
    }
}

pub mod assertions {
    use uuid::Uuid;

    pub fn assert_uuid_eq(actual: Uuid, expected: Uuid, what: &str) {
        assert_eq!(actual, expected, "{what}: expected {expected}, got {actual}");
    }

    /// Unwrap `value`, failing the test with `what` when it is `None`.
    #[track_caller]
    pub fn assert_some<T>(value: Option<T>, what: &str) -> T {
        match value {
            Some(value) => value,
            None => panic!("{what}: expected Some, got None"),
        }
    }
}
