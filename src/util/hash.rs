use crate::core::types::{AuthCode, HashedAuthCode};

use subtle::ConstantTimeEq;

pub trait HashTo: AsRef<str> {
    type HashedType: From<String>;
}

impl HashTo for AuthCode {
    type HashedType = HashedAuthCode;
}

/// Unsalted SHA-512, URL-safe base64. Only suitable for high-entropy input.
pub fn hash_without_salt<T: HashTo>(to_hash: &T) -> T::HashedType {
    use sha2::Digest;

    let digest = sha2::Sha512::digest(to_hash.as_ref().as_bytes());
    base64::encode_config(digest, base64::URL_SAFE).into()
}

pub fn constant_time_eq(lhs: &str, rhs: &str) -> bool {
    lhs.as_bytes().ct_eq(rhs.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        let code = AuthCode("c0de".to_string());
        let a: HashedAuthCode = hash_without_salt(&code);
        let b: HashedAuthCode = hash_without_salt(&code);
        assert_eq!(a, b);
        assert_ne!(a.0, code.0);
    }

    #[test]
    fn different_codes_hash_differently() {
        let a = hash_without_salt(&AuthCode("one".to_string()));
        let b = hash_without_salt(&AuthCode("two".to_string()));
        assert_ne!(a, b);
    }

    #[test]
    fn constant_time_eq_compares_content() {
        assert!(constant_time_eq("secret", "secret"));
        assert!(!constant_time_eq("secret", "secreT"));
        assert!(!constant_time_eq("secret", "secret-longer"));
    }
}
