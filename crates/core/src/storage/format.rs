//! Binary container for encrypted portfolio backups.
//!
//! ```text
//! [FCBK: 4B] [version: 2B LE] [memory_cost: 4B LE] [time_cost: 4B LE]
//! [parallelism: 4B LE] [salt: 16B] [nonce: 12B] [payload_len: 8B LE]
//! [payload: AES-256-GCM ciphertext of the portfolio JSON]
//! ```

use super::encryption::{KdfParams, NONCE_LEN, SALT_LEN};
use crate::errors::CoreError;

pub const MAGIC: &[u8; 4] = b"FCBK";
pub const CURRENT_VERSION: u16 = 1;
pub const HEADER_LEN: usize = 4 + 2 + 12 + SALT_LEN + NONCE_LEN + 8;

#[derive(Debug, Clone, PartialEq)]
pub struct BackupHeader {
    pub version: u16,
    pub kdf: KdfParams,
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
}

pub fn encode(header: &BackupHeader, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&header.version.to_le_bytes());
    buf.extend_from_slice(&header.kdf.memory_cost.to_le_bytes());
    buf.extend_from_slice(&header.kdf.time_cost.to_le_bytes());
    buf.extend_from_slice(&header.kdf.parallelism.to_le_bytes());
    buf.extend_from_slice(&header.salt);
    buf.extend_from_slice(&header.nonce);
    buf.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    buf.extend_from_slice(payload);
    buf
}

/// Sequential little-endian reader over the header bytes.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take<const N: usize>(&mut self, what: &str) -> Result<[u8; N], CoreError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or_else(|| CoreError::InvalidFileFormat(format!("Truncated header at {what}")))?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn u16(&mut self, what: &str) -> Result<u16, CoreError> {
        Ok(u16::from_le_bytes(self.take(what)?))
    }

    fn u32(&mut self, what: &str) -> Result<u32, CoreError> {
        Ok(u32::from_le_bytes(self.take(what)?))
    }

    fn u64(&mut self, what: &str) -> Result<u64, CoreError> {
        Ok(u64::from_le_bytes(self.take(what)?))
    }
}

/// Parse and validate a backup header. Returns the header and the payload.
pub fn decode(data: &[u8]) -> Result<(BackupHeader, &[u8]), CoreError> {
    if data.len() < HEADER_LEN {
        return Err(CoreError::InvalidFileFormat(
            "File too small to be a portfolio backup".into(),
        ));
    }

    let mut cur = Cursor { data, pos: 0 };
    if &cur.take::<4>("magic")? != MAGIC {
        return Err(CoreError::InvalidFileFormat(
            "Invalid magic bytes: not a portfolio backup".into(),
        ));
    }

    let version = cur.u16("version")?;
    if version == 0 || version > CURRENT_VERSION {
        return Err(CoreError::UnsupportedVersion(version));
    }

    let kdf = KdfParams {
        memory_cost: cur.u32("memory_cost")?,
        time_cost: cur.u32("time_cost")?,
        parallelism: cur.u32("parallelism")?,
    };
    kdf.validate()?;

    let salt = cur.take::<SALT_LEN>("salt")?;
    let nonce = cur.take::<NONCE_LEN>("nonce")?;
    let payload_len = cur.u64("payload_len")?;

    let start = cur.pos;
    let end = usize::try_from(payload_len)
        .ok()
        .and_then(|len| start.checked_add(len))
        .filter(|end| *end <= data.len())
        .ok_or_else(|| {
            CoreError::InvalidFileFormat(format!(
                "File truncated: header announces {payload_len} payload bytes, found {}",
                data.len() - start
            ))
        })?;

    Ok((
        BackupHeader {
            version,
            kdf,
            salt,
            nonce,
        },
        &data[start..end],
    ))
}
