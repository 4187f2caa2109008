//! Reader kinds and the factories that build them

use crate::config::PoolConfig;
use crate::errors::{PoolError, PoolResult};
use crate::pool::Pool;
use crate::remote::{ObjectStore, RemoteReader};

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Capability contract every pooled reader satisfies.
///
/// The pool never interprets reader contents; it only manages possession of
/// values that can read with an internal position and seek to an offset.
pub trait SeekRead: Read + Seek + Send {}

impl<T: Read + Seek + Send> SeekRead for T {}

/// Boxed reader handed out by a [`ReaderPool`]
pub type SeekReader = Box<dyn SeekRead>;

/// Pool of boxed seekable readers, built from a kind string and parameters
pub type ReaderPool = Pool<SeekReader>;

/// The closed set of reader kinds a pool can be built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Local file opened by path
    File,
    /// Concatenation of remote object-store keys
    RemoteObject,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::File => "file",
            ResourceKind::RemoteObject => "remote-object",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(ResourceKind::File),
            "remote-object" => Ok(ResourceKind::RemoteObject),
            other => Err(PoolError::UnsupportedKind(other.to_string())),
        }
    }
}

/// Kind-specific construction parameters, captured once at pool creation
/// and immutable for the pool's lifetime.
pub enum ReaderParams {
    File {
        path: PathBuf,
    },
    RemoteObject {
        store: Arc<dyn ObjectStore>,
        bucket: String,
        keys: Vec<String>,
    },
}

impl Pool<SeekReader> {
    /// Build a pool for `kind` (`"file"` or `"remote-object"`).
    ///
    /// Parameters are validated against the kind's expected shape before the
    /// factory is bound; nothing is opened or fetched until the first cache
    /// miss during [`acquire`](Pool::acquire).
    ///
    /// # Errors
    ///
    /// [`PoolError::UnsupportedKind`] for an unknown kind string,
    /// [`PoolError::InvalidParams`] when `params` does not match the kind or
    /// a parameter is empty, [`PoolError::InvalidCapacity`] for a zero
    /// capacity.
    pub fn open(kind: &str, config: PoolConfig, params: ReaderParams) -> PoolResult<ReaderPool> {
        let kind = kind.parse::<ResourceKind>()?;

        match (kind, params) {
            (ResourceKind::File, ReaderParams::File { path }) => {
                if path.as_os_str().is_empty() {
                    return Err(PoolError::InvalidParams {
                        kind,
                        param: "path",
                    });
                }
                Pool::new(kind, config, move || {
                    let file = File::open(&path)?;
                    Ok(Box::new(file) as SeekReader)
                })
            }
            (ResourceKind::RemoteObject, ReaderParams::RemoteObject { store, bucket, keys }) => {
                if bucket.is_empty() {
                    return Err(PoolError::InvalidParams {
                        kind,
                        param: "bucket",
                    });
                }
                if keys.is_empty() {
                    return Err(PoolError::InvalidParams {
                        kind,
                        param: "keys",
                    });
                }
                Pool::new(kind, config, move || {
                    let reader = RemoteReader::new(Arc::clone(&store), &bucket, &keys)?;
                    Ok(Box::new(reader) as SeekReader)
                })
            }
            (ResourceKind::File, _) => Err(PoolError::InvalidParams {
                kind,
                param: "path",
            }),
            (ResourceKind::RemoteObject, _) => Err(PoolError::InvalidParams {
                kind,
                param: "store",
            }),
        }
    }
}
