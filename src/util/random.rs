use rand::RngCore;

use crate::core::types::{AuthCode, ClientSecret};
use crate::provider::error::Error;

/// Source of unpredictable bytes. Failing is preferable to degrading.
pub trait RandomSource: Send + Sync {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn try_fill(&self, dest: &mut [u8]) -> Result<(), rand::Error> {
        rand::rngs::OsRng.try_fill_bytes(dest)
    }
}

pub trait FromRandom: Sized {
    fn from_random(source: &dyn RandomSource) -> Result<Self, Error>;
}

impl FromRandom for AuthCode {
    fn from_random(source: &dyn RandomSource) -> Result<Self, Error> {
        random_string(source, 32).map(AuthCode)
    }
}

impl FromRandom for ClientSecret {
    fn from_random(source: &dyn RandomSource) -> Result<Self, Error> {
        random_string(source, 48).map(ClientSecret)
    }
}

fn random_string(source: &dyn RandomSource, size: usize) -> Result<String, Error> {
    let mut bytes = vec![0u8; size];
    source.try_fill(&mut bytes)?;
    Ok(base64::encode_config(bytes, base64::URL_SAFE_NO_PAD))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::Exhausted;
    use std::collections::HashSet;

    #[test]
    fn codes_are_url_safe_and_unique() {
        let codes: HashSet<String> = (0..256)
            .map(|_| AuthCode::from_random(&OsRandom).unwrap().0)
            .collect();
        assert_eq!(codes.len(), 256);
        for code in &codes {
            assert_eq!(code.len(), 43);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        }
    }

    #[test]
    fn failing_source_yields_no_code() {
        let result = AuthCode::from_random(&Exhausted);
        assert!(matches!(result, Err(Error::Random(_))));
    }
}
