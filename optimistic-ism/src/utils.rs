use sha3::{digest::Update, Digest, Keccak256};

use primitive_types::H256;

/// Computes the identity of a raw message: the keccak-256 digest of its
/// bytes.
///
/// Two messages with identical bytes share an identity; the proposal ledger
/// is idempotent by content. Metadata never participates in the identity.
pub fn message_id(message: &[u8]) -> H256 {
    H256::from_slice(Keccak256::new().chain(message).finalize().as_slice())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_message_id() {
        // keccak256 of the empty byte string
        let expected = H256::from_slice(
            &hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap(),
        );
        assert_eq!(message_id(&[]), expected);
    }

    #[test]
    fn identity_depends_only_on_content() {
        assert_eq!(message_id(b"hello"), message_id(b"hello"));
        assert_ne!(message_id(b"hello"), message_id(b"hello "));
    }
}
