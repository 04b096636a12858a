use blake2::Blake2s256;
use sha2::{Digest, Sha256};

use super::DIGEST_SIZE;

/// Backend interface implemented by the supported hash families.
pub trait HashBackend: Sized + Clone {
    /// Creates a fresh hasher state.
    fn new() -> Self;

    /// Absorbs additional bytes into the hasher state.
    fn update(&mut self, bytes: &[u8]);

    /// Finalises the hasher and returns a 32-byte digest.
    fn finalize(self) -> [u8; DIGEST_SIZE];
}

/// SHA-256 backend.
#[derive(Clone, Default)]
pub struct Sha256Backend {
    inner: Sha256,
}

impl HashBackend for Sha256Backend {
    fn new() -> Self {
        Self {
            inner: Sha256::new(),
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.inner, bytes);
    }

    fn finalize(self) -> [u8; DIGEST_SIZE] {
        self.inner.finalize().into()
    }
}

/// BLAKE2s-256 backend.
#[derive(Clone, Default)]
pub struct Blake2sBackend {
    inner: Blake2s256,
}

impl HashBackend for Blake2sBackend {
    fn new() -> Self {
        Self {
            inner: Blake2s256::new(),
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.inner, bytes);
    }

    fn finalize(self) -> [u8; DIGEST_SIZE] {
        self.inner.finalize().into()
    }
}
