use md4::Md4;
use sha1::{Digest, Sha1};

use crate::PREFIX_LEN;
use crate::config::HashMode;
use crate::error::{Error, ProtocolError};

/// Smallest digest that still yields a full 5-character hex prefix.
pub const MIN_DIGEST_LEN: usize = PREFIX_LEN.div_ceil(2);

/// The two halves of a digest's hex text: the prefix sent to the server and
/// the suffix matched locally against the returned records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeKey {
    prefix: String,
    suffix: String,
}

impl RangeKey {
    /// Splits a finalized digest into its range prefix (lowercase, as
    /// hex-encoded) and its uppercase suffix.
    pub fn from_digest(digest: &[u8]) -> Result<Self, Error> {
        if digest.len() < MIN_DIGEST_LEN {
            return Err(Error::DigestTooShort { len: digest.len() });
        }

        let mut hex = hex::encode(digest);
        let suffix = hex.split_off(PREFIX_LEN).to_ascii_uppercase();

        Ok(Self { prefix: hex, suffix })
    }

    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

/// Hashes `password` into the digest family served by `mode`: SHA-1 of the
/// UTF-8 bytes, or NTLM (MD4 of the UTF-16LE code units).
pub fn password_digest(password: &str, mode: HashMode) -> Vec<u8> {
    match mode {
        HashMode::Sha1 => Sha1::digest(password.as_bytes()).to_vec(),
        HashMode::Ntlm => {
            let mut hasher = Md4::new();
            for unit in password.encode_utf16() {
                hasher.update(unit.to_le_bytes());
            }
            hasher.finalize().to_vec()
        }
    }
}

/// Matches one `SUFFIX:COUNT` line against `suffix`.
///
/// Returns `Ok(Some(count))` when the record's suffix equals `suffix`
/// (ignoring ASCII case), `Ok(None)` for any other record, and an error when
/// the matching record carries a count that is not a non-negative integer.
/// Only the matching line has its count parsed, so unrelated malformed lines
/// don't fail the lookup.
#[inline]
pub fn match_record(line: &str, suffix: &str) -> Result<Option<u64>, ProtocolError> {
    let line = line.trim();
    let (record_suffix, count) = line.split_once(':').unwrap_or((line, ""));

    if !record_suffix.eq_ignore_ascii_case(suffix) {
        return Ok(None);
    }

    let count = count.trim();
    count.parse::<u64>().map(Some).map_err(|_| ProtocolError::Count {
        suffix: record_suffix.to_string(),
        value: count.to_string(),
    })
}
