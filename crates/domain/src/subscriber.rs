use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hash that authorizes the browser inbox of `subscriber_id` at the
/// workflow engine. Must only be computed server side as it requires the
/// workflow engine secret.
pub fn generate_subscriber_hash(subscriber_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(subscriber_id.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_generates_hex_hmac() {
        // RFC 4231 test case 2
        assert_eq!(
            generate_subscriber_hash("what do ya want for nothing?", "Jefe"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn hash_depends_on_secret() {
        let a = generate_subscriber_hash("user-1", "secret-a");
        let b = generate_subscriber_hash("user-1", "secret-b");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
