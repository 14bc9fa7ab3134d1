use md5::{Digest, Md5};

/// Salt for the image MD5 checksum
///
/// TP-Link uses the same salt for most devices that use the SafeLoader image format.
pub const MD5_SALT: [u8; 16] = [
    0x7a, 0x2b, 0x15, 0xed, 0x9b, 0x98, 0x59, 0x6d, 0xe5, 0x04, 0xab, 0x44, 0xac, 0x2a, 0x9f, 0x4e,
];

/// Calculates the MD5 digest of `salt` followed by `data`
pub fn digest(salt: &[u8; 16], data: &[u8]) -> [u8; 16] {
    let mut hasher = Md5::new();

    hasher.update(salt);
    hasher.update(data);

    let mut out = [0u8; 16];
    out.copy_from_slice(&hasher.finalize());

    out
}

/// Incremental version of `digest` for streaming large images from disk
pub(crate) struct SaltedDigest(Md5);

impl SaltedDigest {
    pub fn new(salt: &[u8; 16]) -> SaltedDigest {
        let mut hasher = Md5::new();
        hasher.update(salt);

        SaltedDigest(hasher)
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    pub fn finish(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out.copy_from_slice(&self.0.finalize());

        out
    }
}

#[cfg(test)]
mod tests {
    use assert_hex::*;
    use hex_literal::hex;

    use super::*;

    #[test]
    fn it_should_digest_the_salt_alone() {
        assert_eq_hex!(
            digest(&MD5_SALT, &[]),
            hex!("91dcd7fd5a66ad287af7fd8601c12dbb")
        );
    }

    #[test]
    fn it_should_prefix_data_with_the_salt() {
        assert_eq_hex!(
            digest(&MD5_SALT, b"hello world"),
            hex!("580b74b67206466c61c4610921b5d667")
        );
    }

    #[test]
    fn it_should_match_the_streaming_digest() {
        let mut streaming = SaltedDigest::new(&MD5_SALT);
        streaming.update(b"hello ");
        streaming.update(b"world");

        assert_eq!(streaming.finish(), digest(&MD5_SALT, b"hello world"));
    }
}
