//! Pool configuration options

use std::time::Duration;

/// Configuration for pool behavior
///
/// Capacity is the number of admission slots: the maximum number of readers
/// that can be checked out at once. It is fixed for the pool's lifetime and
/// validated when the pool is built.
///
/// # Examples
///
/// ```
/// use seekpool::PoolConfig;
/// use std::time::Duration;
///
/// let config = PoolConfig::new(4)
///     .with_acquire_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.capacity, 4);
/// assert_eq!(config.acquire_timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    /// Maximum number of readers checked out simultaneously
    pub capacity: usize,

    /// Deadline applied to every `acquire` call; `None` waits without limit
    pub acquire_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: 8,
            acquire_timeout: None,
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the given capacity and no acquire timeout
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            acquire_timeout: None,
        }
    }

    /// Set the capacity
    ///
    /// # Examples
    ///
    /// ```
    /// use seekpool::PoolConfig;
    ///
    /// let config = PoolConfig::default().with_capacity(2);
    /// assert_eq!(config.capacity, 2);
    /// ```
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Apply a deadline to every `acquire` call
    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }
}
