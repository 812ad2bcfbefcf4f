use crate::engine::{Vault, VaultInner};
use crate::error::VaultError;
use crate::types::{Aes, VaultCipher};
use aead::Key;
use hkdf::Hkdf;
use private::Sealed;
use sha2::Sha256;
use std::marker::PhantomData;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Default, ZeroizeOnDrop)]
pub struct NoKey;
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct WithKey {
    key: [u8; 32],
}

impl std::fmt::Debug for WithKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WithKey(..)")
    }
}

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoKey {}
impl Sealed for WithKey {}

/// A builder for secure initialization of the [`Vault`].
///
/// Implements `ZeroizeOnDrop` so derived key material is wiped as soon as the builder is gone.
#[allow(private_bounds)]
#[derive(Debug, Zeroize, ZeroizeOnDrop)]
pub struct VaultBuilder<C: VaultCipher = Aes, K: Sealed + ZeroizeOnDrop = NoKey> {
    #[zeroize(skip)]
    _cipher: PhantomData<C>,
    key: K,
}

impl<C: VaultCipher> Default for VaultBuilder<C> {
    fn default() -> Self {
        Self { _cipher: PhantomData, key: NoKey }
    }
}

impl<C: VaultCipher> VaultBuilder<C> {
    /// Creates a new empty builder.
    #[must_use = "Builder must be configured with `derived_key` before use"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives the cipher key using HKDF-SHA256.
    ///
    /// # Arguments
    /// * `ikm`: Input keying material, normally the installation key.
    /// * `salt`: Uniquifies keys across installations or products.
    /// * `purpose`: Binds the derived key to one use, e.g. `b"v1_credentials"`.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if `ikm` is empty or the expansion fails.
    pub fn derived_key(
        self,
        ikm: impl AsRef<[u8]>,
        salt: impl AsRef<[u8]>,
        purpose: impl AsRef<[u8]>,
    ) -> Result<VaultBuilder<C, WithKey>, VaultError> {
        if ikm.as_ref().is_empty() {
            return Err(VaultError::InvalidConfiguration {
                message: "Input keying material must not be empty".into(),
                context: None,
            });
        }

        let (_, hk) = Hkdf::<Sha256>::extract(Some(salt.as_ref()), ikm.as_ref());
        let mut key = [0u8; 32];

        let mut info = Vec::from(b"v1:".as_slice());
        info.extend_from_slice(purpose.as_ref());

        hk.expand(&info, &mut key).map_err(|_| VaultError::InvalidConfiguration {
            message: "HKDF expansion failed".into(),
            context: None,
        })?;

        info.zeroize();

        Ok(VaultBuilder { _cipher: PhantomData, key: WithKey { key } })
    }
}

impl<C: VaultCipher> VaultBuilder<C, WithKey> {
    /// Finalizes vault construction and zeroes the builder.
    ///
    /// # Errors
    /// Returns [`VaultError::InvalidConfiguration`] if the cipher rejects the key length.
    pub fn build(mut self) -> Result<Vault<C>, VaultError> {
        let key = Key::<C>::try_from(&self.key.key[..]).map_err(|_| {
            VaultError::InvalidConfiguration {
                message: format!("Invalid key length {}, must be 32 bytes", self.key.key.len())
                    .into(),
                context: None,
            }
        })?;
        let cipher = C::new(&key);

        self.zeroize();

        Ok(Vault { inner: Arc::new(VaultInner { cipher }) })
    }
}
