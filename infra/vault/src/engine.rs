use aead::Nonce;
use aead::inout::InOutBuf;
use getrandom::fill;
use std::sync::Arc;
use zeroize::Zeroizing;

use crate::builder::VaultBuilder;
use crate::error::VaultError;
use crate::types::{
    Aes, ENVELOPE_VERSION_V1, Envelope, HEADER_LEN, MIN_ENVELOPE_LEN, NONCE_LEN, TAG_LEN,
    VaultCipher,
};

pub(crate) struct VaultInner<C: VaultCipher = Aes> {
    pub(crate) cipher: C,
}

/// Authenticated encryption of small secrets under one derived key.
///
/// `Vault` wraps its cipher in an [`Arc`], so clones are cheap and share the key schedule.
///
/// ### Generic Parameters
/// * `C`: The AEAD implementation. Defaults to [`Aes`] (AES-256-GCM); [`ChaCha`] is the
///   alternative for hosts without AES acceleration.
///
/// [`ChaCha`]: crate::algorithms::ChaCha
pub struct Vault<C: VaultCipher = Aes> {
    pub(crate) inner: Arc<VaultInner<C>>,
}

impl<C: VaultCipher> std::fmt::Debug for Vault<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault").field("cipher", &std::any::type_name::<C>()).finish()
    }
}

impl<C: VaultCipher> Clone for Vault<C> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<C: VaultCipher> Vault<C> {
    /// Returns a new [`VaultBuilder`] to configure the vault.
    #[must_use]
    pub fn builder() -> VaultBuilder<C> {
        VaultBuilder::<C>::new()
    }

    fn next_nonce() -> Result<Nonce<C>, VaultError> {
        let mut nonce = Nonce::<C>::default();
        fill(&mut nonce).map_err(|e| VaultError::Internal {
            message: e.to_string().into(),
            context: Some("System RNG unavailable for nonce generation".into()),
        })?;
        Ok(nonce)
    }

    /// Encrypts `data`, binding it to `context` as associated data.
    ///
    /// # Errors
    /// * [`VaultError::Internal`] If no nonce can be drawn from the system RNG.
    /// * [`VaultError::Encryption`] If the AEAD encryption fails.
    pub fn seal(
        &self,
        data: impl AsRef<[u8]>,
        context: &[u8],
    ) -> Result<Envelope<C>, VaultError> {
        let data = data.as_ref();
        let nonce = Self::next_nonce()?;

        let mut buf = Vec::with_capacity(MIN_ENVELOPE_LEN + data.len());
        buf.push(ENVELOPE_VERSION_V1);
        buf.push(0);
        buf.extend_from_slice(&nonce);
        buf.extend_from_slice(data);

        let in_out = InOutBuf::from(&mut buf[HEADER_LEN + NONCE_LEN..]);

        let tag = self.inner.cipher.encrypt_inout_detached(&nonce, context, in_out).map_err(
            |_| VaultError::Encryption {
                message: "Encryption failed".into(),
                context: Some("AEAD encryption failed".into()),
            },
        )?;

        buf.extend_from_slice(tag.as_slice());
        Ok(Envelope::from(buf))
    }

    /// Decrypts an envelope sealed under the same key and `context`.
    ///
    /// The plaintext is returned in a [`Zeroizing`] buffer.
    ///
    /// # Errors
    /// * [`VaultError::InvalidPayload`] If the envelope is truncated or has an unknown header.
    /// * [`VaultError::Decryption`] If the key, context or data do not authenticate.
    pub fn unseal(
        &self,
        envelope: impl AsRef<[u8]>,
        context: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let blob = envelope.as_ref();

        if blob.len() < MIN_ENVELOPE_LEN {
            return Err(VaultError::InvalidPayload {
                message: format!(
                    "Envelope too short ({} bytes). Expected at least {MIN_ENVELOPE_LEN} bytes",
                    blob.len(),
                )
                .into(),
                context: None,
            });
        }

        let (version, flags) = (blob[0], blob[1]);
        if version != ENVELOPE_VERSION_V1 {
            return Err(VaultError::InvalidPayload {
                message: "Unsupported envelope version".into(),
                context: Some(format!("version={version}").into()),
            });
        }
        if flags != 0 {
            return Err(VaultError::InvalidPayload {
                message: "Unsupported envelope flags".into(),
                context: Some(format!("flags={flags:#04x}").into()),
            });
        }

        let rest = &blob[HEADER_LEN..];
        let (nonce_slice, rest) = rest.split_at(NONCE_LEN);
        let (ciphertext, tag_slice) = rest.split_at(rest.len() - TAG_LEN);

        let nonce = nonce_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid nonce length".into(),
            context: None,
        })?;

        let tag = tag_slice.try_into().map_err(|_| VaultError::Decryption {
            message: "Invalid tag length".into(),
            context: None,
        })?;

        let mut buf = Zeroizing::new(ciphertext.to_vec());
        let in_out = InOutBuf::from(&mut buf[..]);

        self.inner.cipher.decrypt_inout_detached(&nonce, context, in_out, &tag).map_err(|_| {
            VaultError::Decryption {
                message: "Decryption failed".into(),
                context: Some("AEAD authentication failed".into()),
            }
        })?;

        Ok(buf)
    }
}
