// File: src/core/hasher.rs
use crate::config::MAX_SALT_LEN;
use crate::core::types::Fingerprint;
use crate::error::{GsgError, Result};
use chrono::{DateTime, Utc};

/// Digest width in bytes. Changing it changes every uid ever generated.
pub const DIGEST_SIZE: usize = 7;

/// Raw 7-byte salted BLAKE2s digest.
///
/// Layout: byte 0 is the bucket index, bytes 1..=4 are the little-endian
/// fingerprint, byte 6 is the reserved "keep" byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest7([u8; DIGEST_SIZE]);

impl Digest7 {
    pub fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    pub fn bucket_idx(&self) -> u8 {
        self.0[0]
    }

    pub fn fingerprint(&self) -> u32 {
        u32::from_le_bytes([self.0[1], self.0[2], self.0[3], self.0[4]])
    }

    /// Reserved. Computed for format stability, carries no meaning here.
    pub fn keep(&self) -> u8 {
        self.0[6]
    }

    pub fn pair(&self) -> Fingerprint {
        Fingerprint {
            bucket_idx: self.bucket_idx(),
            value_hash: self.fingerprint(),
        }
    }
}

/// Salted hash primitive mapping strings and bytes to `(bucket, fingerprint)`.
#[derive(Debug, Clone)]
pub struct Hasher {
    salt: Vec<u8>,
}

impl Hasher {
    pub fn new(salt: &[u8]) -> Result<Self> {
        if salt.len() > MAX_SALT_LEN {
            return Err(GsgError::Config(format!(
                "salt is {} bytes, BLAKE2s accepts at most {}",
                salt.len(),
                MAX_SALT_LEN
            )));
        }
        Ok(Self {
            salt: salt.to_vec(),
        })
    }

    pub fn digest(&self, bytes: &[u8]) -> Digest7 {
        let hash = blake2s_simd::Params::new()
            .hash_length(DIGEST_SIZE)
            .salt(&self.salt)
            .hash(bytes);
        let mut out = [0u8; DIGEST_SIZE];
        out.copy_from_slice(hash.as_bytes());
        Digest7(out)
    }

    /// Hashes raw bytes unmodified.
    pub fn hash_bytes(&self, bytes: &[u8]) -> Fingerprint {
        self.digest(bytes).pair()
    }

    /// Lowercases, encodes as UTF-8, then hashes.
    pub fn hash_str(&self, value: &str) -> Fingerprint {
        self.hash_bytes(value.to_lowercase().as_bytes())
    }

    /// Like [`Hasher::hash_str`] for text arriving as bytes.
    /// Fails with [`GsgError::Encoding`] if the bytes are not UTF-8.
    pub fn hash_text_bytes(&self, raw: &[u8]) -> Result<Fingerprint> {
        let text = std::str::from_utf8(raw).map_err(|_| GsgError::Encoding {
            value: String::from_utf8_lossy(raw).into_owned(),
        })?;
        Ok(self.hash_str(text))
    }

    /// Hashes the POSIX timestamp of `at` (default: now) in its float text form.
    pub fn hash_datetime(&self, at: Option<DateTime<Utc>>) -> Fingerprint {
        let at = at.unwrap_or_else(Utc::now);
        self.hash_str(&timestamp_text(&at))
    }
}

/// Seconds since the epoch with microsecond fraction, always with a decimal
/// point: `1700000000.0`, `1700000000.25`.
fn timestamp_text(at: &DateTime<Utc>) -> String {
    let seconds = at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0;
    let text = seconds.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{text}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn hasher() -> Hasher {
        Hasher::new(b"5963").unwrap()
    }

    #[test]
    fn known_answers_for_reference_salt() {
        let h = hasher();
        assert_eq!(
            h.hash_str("fyc"),
            Fingerprint {
                bucket_idx: 173,
                value_hash: 1_743_110_407,
            }
        );
        assert_eq!(
            h.hash_str("city__paris"),
            Fingerprint {
                bucket_idx: 144,
                value_hash: 1_990_887_620,
            }
        );
        assert_eq!(
            h.hash_str(""),
            Fingerprint {
                bucket_idx: 85,
                value_hash: 862_126_230,
            }
        );
    }

    #[test]
    fn digest_layout() {
        let digest = hasher().digest(b"fyc");
        assert_eq!(digest.as_bytes(), &[0xad, 0x07, 0xc1, 0xe5, 0x67, 0xb7, 0x3c]);
        assert_eq!(digest.bucket_idx(), 0xad);
        assert_eq!(digest.fingerprint(), u32::from_le_bytes([0x07, 0xc1, 0xe5, 0x67]));
        assert_eq!(digest.keep(), 0x3c);
    }

    #[test]
    fn strings_are_case_folded_bytes_are_not() {
        let h = hasher();
        assert_eq!(h.hash_str("Vocabulary__PARIS"), h.hash_str("vocabulary__paris"));
        assert_eq!(h.hash_bytes(b"fyc"), h.hash_str("FYC"));
        assert_ne!(h.hash_bytes(b"FYC"), h.hash_str("FYC"));
    }

    #[test]
    fn salt_changes_output() {
        let other = Hasher::new(b"0000").unwrap();
        assert_ne!(hasher().hash_str("fyc"), other.hash_str("fyc"));
    }

    #[test]
    fn long_salt_rejected() {
        assert!(matches!(Hasher::new(b"far too long"), Err(GsgError::Config(_))));
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let h = hasher();
        let err = h.hash_text_bytes(&[0x66, 0xff, 0x63]).unwrap_err();
        assert!(matches!(err, GsgError::Encoding { .. }));
        assert_eq!(h.hash_text_bytes(b"FYC").unwrap(), h.hash_str("fyc"));
    }

    #[test]
    fn datetime_hash_uses_float_timestamp_text() {
        let whole = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let half = Utc.timestamp_opt(1_700_000_000, 500_000_000).unwrap();
        assert_eq!(timestamp_text(&whole), "1700000000.0");
        assert_eq!(timestamp_text(&half), "1700000000.5");

        let h = hasher();
        assert_eq!(h.hash_datetime(Some(whole)), h.hash_str("1700000000.0"));
    }
}
