//! # seekpool
//!
//! Bounded, thread-safe pool of reusable seekable readers.
//!
//! A pool hands out exclusive readers over a local file or over the
//! concatenation of keys in a remote object store. It is built from two
//! decoupled primitives: a lock-free reuse cache of idle readers and an
//! admission gate with a fixed number of slots. Checkouts beyond the
//! capacity suspend until a reader is checked back in.
//!
//! ## Features
//!
//! - Hard bound on concurrently checked-out readers, enforced by blocking
//! - Automatic checkin via RAII (Drop trait)
//! - Lazy construction: the factory runs only on a cache miss
//! - Slot-neutral construction failure: a failed build never shrinks the
//!   pool's capacity
//! - Fail-fast close that wakes suspended acquirers
//! - Cancel-safe acquisition, optional deadlines, activity counters
//!
//! ## Quick Start
//!
//! ```
//! use seekpool::{PoolConfig, ReaderParams, ReaderPool};
//! use std::io::Read;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = std::env::temp_dir().join("seekpool-quickstart.txt");
//! std::fs::write(&path, b"hello")?;
//!
//! let pool = ReaderPool::open("file", PoolConfig::new(2), ReaderParams::File { path })?;
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()?;
//! rt.block_on(async {
//!     let mut reader = pool.acquire().await?;
//!     let mut text = String::new();
//!     reader.read_to_string(&mut text)?;
//!     assert_eq!(text, "hello");
//!     // reader checks back in here and is reused by the next acquire
//!     Ok::<_, Box<dyn std::error::Error>>(())
//! })?;
//! # Ok(())
//! # }
//! ```

mod config;
mod errors;
mod kind;
mod metrics;
mod pool;
mod remote;

pub use config::PoolConfig;
pub use errors::{FactoryError, PoolError, PoolResult};
pub use kind::{ReaderParams, ReaderPool, ResourceKind, SeekRead, SeekReader};
pub use metrics::PoolMetrics;
pub use pool::{Pool, Pooled};
pub use remote::{ObjectStore, RemoteReader};
