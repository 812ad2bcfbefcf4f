use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `input`.
#[must_use]
pub fn digest(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

pub(crate) fn is_digest(candidate: &str) -> bool {
    candidate.len() == 64 && candidate.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_known_vector() {
        let expected = hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
        assert_eq!(Sha256::digest(b"abc")[..], expected);
        assert_eq!(digest("abc"), hex::encode(expected));
    }

    #[test]
    fn test_digest_shape() {
        assert!(is_digest(&digest("alice")));
        assert!(!is_digest("alice"));
        assert!(!is_digest(&digest("alice").to_uppercase()));
    }
}
