use aead::{AeadInOut, KeyInit};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use std::marker::PhantomData;
use std::ops::Deref;

// --- Aliases ---

pub type Aes = Aes256Gcm;
pub type ChaCha = ChaCha20Poly1305;

pub trait VaultCipher: AeadInOut + KeyInit + 'static {}
impl<T: AeadInOut + KeyInit + 'static> VaultCipher for T {}

// --- Envelope format constants ---

/// Envelope header version.
pub(crate) const ENVELOPE_VERSION_V1: u8 = 1;

/// Header layout: `[version: u8][flags: u8]`
pub(crate) const HEADER_LEN: usize = 2;

/// AEAD nonce length (96-bit).
pub(crate) const NONCE_LEN: usize = 12;

/// AEAD tag length (128-bit).
pub(crate) const TAG_LEN: usize = 16;

/// Smallest well-formed envelope: header, nonce and tag around an empty ciphertext.
pub(crate) const MIN_ENVELOPE_LEN: usize = HEADER_LEN + NONCE_LEN + TAG_LEN;

// --- Container ---

/// Sealed bytes produced by [`Vault::seal`](crate::Vault::seal).
///
/// ```text
/// [V(1)][FLAGS(1)][NONCE(12)][CIPHERTEXT(N)][TAG(16)]
/// ```
///
/// The `C` parameter records which cipher produced the envelope so it is not handed to a
/// vault of a different algorithm by accident.
#[derive(Clone)]
pub struct Envelope<C = Aes> {
    pub(crate) data: Vec<u8>,
    _cipher: PhantomData<C>,
}

impl<C> std::fmt::Debug for Envelope<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("version", &self.version())
            .field("len", &self.data.len())
            .finish()
    }
}

impl<C> PartialEq for Envelope<C> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<C> Eq for Envelope<C> {}

impl<C> Envelope<C> {
    /// Returns the envelope format version.
    #[must_use]
    pub fn version(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Splits the envelope into `(header, nonce, ciphertext, tag)`.
    ///
    /// Returns `None` when the envelope is shorter than header, nonce and tag together.
    #[must_use]
    pub fn split(&self) -> Option<(&[u8], &[u8], &[u8], &[u8])> {
        if self.data.len() < MIN_ENVELOPE_LEN {
            return None;
        }
        let (header, rest) = self.data.split_at(HEADER_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag) = rest.split_at(rest.len() - TAG_LEN);
        Some((header, nonce, ciphertext, tag))
    }

    /// Returns the raw sealed bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the envelope, returning the raw sealed bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

impl<C> AsRef<[u8]> for Envelope<C> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl<C> Deref for Envelope<C> {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<C> From<Vec<u8>> for Envelope<C> {
    fn from(data: Vec<u8>) -> Self {
        Self { data, _cipher: PhantomData }
    }
}
