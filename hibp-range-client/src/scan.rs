//! Line-by-line scan of a range response body.
//!
//! The body is read lazily and the scan stops at the first matching record.
//! Lines already read are authoritative: a match found before a read error is
//! returned, while a read error with no match yet is surfaced instead of being
//! reported as "not found".

use std::io::{self, BufRead};

use crate::conversion::{RangeKey, match_record};
use crate::error::{Error, ProtocolError};

/// Scans `reader` for the record matching `key`'s suffix.
///
/// Returns the breach count of the matching record, or 0 when the range
/// contains no such record.
pub fn scan_range<R: BufRead>(reader: R, key: &RangeKey) -> Result<u64, Error> {
    for line in reader.lines() {
        let line = line.map_err(|e| read_error(key, e))?;
        if let Some(count) = match_record(&line, key.suffix())? {
            return Ok(count);
        }
    }

    Ok(0)
}

/// Async counterpart of [`scan_range`].
#[cfg(feature = "tokio")]
pub async fn scan_range_async<R>(reader: R, key: &RangeKey) -> Result<u64, Error>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    use tokio::io::AsyncBufReadExt;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.map_err(|e| read_error(key, e))? {
        if let Some(count) = match_record(&line, key.suffix())? {
            return Ok(count);
        }
    }

    Ok(0)
}

fn read_error(key: &RangeKey, e: io::Error) -> Error {
    // lines() reports non-UTF-8 input as InvalidData.
    if e.kind() == io::ErrorKind::InvalidData {
        return ProtocolError::Encoding.into();
    }
    Error::transport(key.prefix(), e)
}
