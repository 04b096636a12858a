//! Hash primitives shared by leaf preparation and the Merkle builder.
//!
//! Two 256-bit families are available:
//!
//! * [`HashFamily::Sha256`] – the default, reproducing the reference
//!   commitment vectors.
//! * [`HashFamily::Blake2s`] – an alternative family with the same digest
//!   size, selectable through the pipeline parameters.
//!
//! Both are exposed through the streaming [`Hasher`] wrapper so that callers
//! never touch the RustCrypto traits directly.

mod backend;

pub use backend::{Blake2sBackend, HashBackend, Sha256Backend};

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Size of every digest emitted by the supported families.
pub const DIGEST_SIZE: usize = 32;

/// Selection of the hash family used for leaves and internal nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashFamily {
    /// SHA-256 (FIPS 180-4).
    #[default]
    Sha256,
    /// BLAKE2s with a 32-byte output.
    Blake2s,
}

impl HashFamily {
    /// Stable lowercase label used in configuration files and logs.
    pub const fn label(self) -> &'static str {
        match self {
            HashFamily::Sha256 => "sha256",
            HashFamily::Blake2s => "blake2s",
        }
    }
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HashFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(HashFamily::Sha256),
            "blake2s" => Ok(HashFamily::Blake2s),
            other => Err(format!("unknown hash family `{other}`")),
        }
    }
}

/// Fixed-size digest produced by [`Hasher::finalize`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash {
    bytes: [u8; DIGEST_SIZE],
}

impl Hash {
    /// Constructs a hash value from raw bytes.
    pub const fn from_bytes(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation of the digest.
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.bytes
    }

    /// Consumes the hash and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; DIGEST_SIZE] {
        self.bytes
    }

    /// Lowercase hexadecimal rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl From<[u8; DIGEST_SIZE]> for Hash {
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Hash> for [u8; DIGEST_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.into_bytes()
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", self.to_hex())
    }
}

/// Streaming hasher generic over the backend family.
#[derive(Clone)]
pub struct Hasher<B: HashBackend = Sha256Backend> {
    backend: B,
}

impl Hasher<Sha256Backend> {
    /// Creates a SHA-256 hasher.
    pub fn new() -> Self {
        Self::with_backend()
    }
}

impl Default for Hasher<Sha256Backend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: HashBackend> Hasher<B> {
    /// Creates a hasher for an explicit backend.
    pub fn with_backend() -> Self {
        Self { backend: B::new() }
    }

    /// Absorbs additional bytes.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.backend.update(bytes);
        self
    }

    /// Finalises the state into a digest.
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(self.backend.finalize())
    }
}

/// One-shot SHA-256 over `bytes`.
pub fn hash(bytes: &[u8]) -> Hash {
    hash_with_backend::<Sha256Backend>(bytes)
}

/// One-shot hash over `bytes` with an explicit backend.
pub fn hash_with_backend<B: HashBackend>(bytes: &[u8]) -> Hash {
    let mut hasher = Hasher::<B>::with_backend();
    hasher.update(bytes);
    hasher.finalize()
}

/// One-shot hash over `bytes` for a runtime-selected family.
pub fn hash_with_family(family: HashFamily, bytes: &[u8]) -> Hash {
    match family {
        HashFamily::Sha256 => hash_with_backend::<Sha256Backend>(bytes),
        HashFamily::Blake2s => hash_with_backend::<Blake2sBackend>(bytes),
    }
}
