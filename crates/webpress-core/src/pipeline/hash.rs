//! Content fingerprinting for deduplication.

use blake3::Hasher as Blake3Hasher;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// BLAKE3 digest of a file's full byte content.
///
/// Two files with identical bytes have the same fingerprint regardless of
/// their names or locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprint everything readable from `reader`.
    ///
    /// Uses streaming to handle large files efficiently without loading
    /// the entire file into memory.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut hasher = Blake3Hasher::new();

        // Use 64KB buffer for efficient reading
        let mut buffer = [0u8; 65536];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(Self(*hasher.finalize().as_bytes()))
    }

    /// Fingerprint the contents of the file at `path`.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Fingerprint an in-memory byte buffer.
    ///
    /// Used when the file has already been read so that hashing and decoding
    /// share a single read.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Lowercase hex rendering, as stored in the ledger.
    pub fn to_hex(&self) -> String {
        blake3::Hash::from(self.0).to_hex().to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Error returned when a string is not a 64-character hex fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFingerprintError;

impl fmt::Display for ParseFingerprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected 64 hex characters")
    }
}

impl std::error::Error for ParseFingerprintError {}

impl FromStr for Fingerprint {
    type Err = ParseFingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        blake3::Hash::from_hex(s.trim())
            .map(|hash| Self(*hash.as_bytes()))
            .map_err(|_| ParseFingerprintError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_fingerprint_is_deterministic() {
        let data = b"the same bytes twice";
        assert_eq!(Fingerprint::from_bytes(data), Fingerprint::from_bytes(data));
    }

    #[test]
    fn test_different_content_differs() {
        let a = Fingerprint::from_bytes(b"cat.png");
        let b = Fingerprint::from_bytes(b"cat.pnh");
        assert_ne!(a, b);
    }

    #[test]
    fn test_order_sensitive() {
        let a = Fingerprint::from_bytes(b"ab");
        let b = Fingerprint::from_bytes(b"ba");
        assert_ne!(a, b);
    }

    #[test]
    fn test_streaming_matches_in_memory() {
        // Larger than the read buffer so several chunks are hashed.
        let data: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        let streamed = Fingerprint::from_reader(Cursor::new(&data)).unwrap();
        assert_eq!(streamed, Fingerprint::from_bytes(&data));
    }

    #[test]
    fn test_same_content_different_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("renamed.jpg");
        std::fs::write(&a, b"pixels").unwrap();
        std::fs::write(&b, b"pixels").unwrap();

        assert_eq!(
            Fingerprint::from_path(&a).unwrap(),
            Fingerprint::from_path(&b).unwrap()
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Fingerprint::from_path(&dir.path().join("missing")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_hex_roundtrip_and_rejects_garbage() {
        let fp = Fingerprint::from_bytes(b"x");
        let hex = fp.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex.parse::<Fingerprint>().unwrap(), fp);
        assert!("not-a-hash".parse::<Fingerprint>().is_err());
    }
}
