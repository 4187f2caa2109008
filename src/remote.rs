//! Composite reader spanning ordered keys in a remote object store

use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

/// Client-side view of a remote object store.
///
/// Implementations are supplied by the surrounding system (an SDK wrapper,
/// a test double); the reader only needs sized, range-addressable objects.
pub trait ObjectStore: Send + Sync {
    /// Size in bytes of `key` within `bucket`
    fn size(&self, bucket: &str, key: &str) -> io::Result<u64>;

    /// Read up to `buf.len()` bytes of `key` starting at `offset`,
    /// returning the number of bytes read
    fn read_at(&self, bucket: &str, key: &str, offset: u64, buf: &mut [u8]) -> io::Result<usize>;
}

struct Segment {
    key: String,
    start: u64,
    len: u64,
}

/// Presents the concatenation of an ordered key list within one bucket as a
/// single seekable stream.
///
/// Object sizes are fetched once at construction so every later seek is
/// pure arithmetic; reads never cross a key boundary in a single call.
pub struct RemoteReader {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    segments: Vec<Segment>,
    total_len: u64,
    pos: u64,
}

impl RemoteReader {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: &str, keys: &[String]) -> io::Result<Self> {
        let mut segments = Vec::with_capacity(keys.len());
        let mut start = 0u64;

        for key in keys {
            let len = store.size(bucket, key)?;
            segments.push(Segment {
                key: key.clone(),
                start,
                len,
            });
            start += len;
        }

        Ok(Self {
            store,
            bucket: bucket.to_string(),
            segments,
            total_len: start,
            pos: 0,
        })
    }

    /// Total length of the concatenated stream in bytes
    pub fn len(&self) -> u64 {
        self.total_len
    }

    pub fn is_empty(&self) -> bool {
        self.total_len == 0
    }

    fn segment_at(&self, pos: u64) -> Option<&Segment> {
        // zero-length objects never match and are skipped over
        self.segments
            .iter()
            .find(|s| pos >= s.start && pos < s.start + s.len)
    }
}

impl Read for RemoteReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() || self.pos >= self.total_len {
            return Ok(0);
        }

        let Some(segment) = self.segment_at(self.pos) else {
            return Ok(0);
        };

        let offset = self.pos - segment.start;
        let want = (segment.len - offset).min(buf.len() as u64) as usize;
        let n = self
            .store
            .read_at(&self.bucket, &segment.key, offset, &mut buf[..want])?;

        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for RemoteReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => n as i128,
            SeekFrom::End(offset) => self.total_len as i128 + offset as i128,
            SeekFrom::Current(offset) => self.pos as i128 + offset as i128,
        };

        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before the start of the stream",
            ));
        }

        // seeking past the end is allowed; reads there return 0
        self.pos = target as u64;
        Ok(self.pos)
    }
}
