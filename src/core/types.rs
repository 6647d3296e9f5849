use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime},
};

use chrono::{DateTime, Utc};

/// Ordered, de-duplicated list of requested scopes.
///
/// Scopes are only echoed back to the user on the consent screen, so the
/// order in which the client asked for them is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope(Vec<String>);

impl Scope {
    pub fn from_parts(parts: Vec<String>) -> Self {
        let mut scope = Self::default();
        for part in parts {
            scope.push(part);
        }
        scope
    }

    pub fn from_delimited_parts(parts: &str) -> Self {
        Self::from_parts(parts.split(' ').map(ToString::to_string).collect())
    }

    fn push(&mut self, part: String) {
        if !part.is_empty() && !self.0.contains(&part) {
            self.0.push(part);
        }
    }

    pub fn as_parts(&self) -> Vec<String> {
        self.0.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered redirect target. Only ever read from the registry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RedirectUri(pub String);

#[derive(Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(..)")
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AuthCode(pub String);

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCode(..)")
    }
}

/// Digest of an [`AuthCode`]; the only form of a code the registry holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedAuthCode(pub String);

impl From<String> for HashedAuthCode {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl AsRef<str> for HashedAuthCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub struct Expiry(SystemTime);

impl Expiry {
    pub fn as_secs(&self) -> u64 {
        self.0
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        DateTime::<Utc>::from(self.0)
    }
}

pub trait Expire {
    const EXPIRES_IN_SECS: u64;

    fn expiry() -> Expiry {
        let time = SystemTime::now()
            .checked_add(Duration::from_secs(Self::EXPIRES_IN_SECS))
            .unwrap_or_else(SystemTime::now);
        Expiry(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_keeps_request_order_and_drops_duplicates() {
        let scope = Scope::from_delimited_parts("profile email  profile openid");
        assert_eq!(scope.as_parts(), vec!["profile", "email", "openid"]);
    }

    #[test]
    fn blank_scope_has_no_parts() {
        assert!(Scope::from_delimited_parts(" ").is_empty());
    }

    #[test]
    fn secrets_are_not_printed() {
        let secret = ClientSecret("hunter2".to_string());
        let code = AuthCode("abc".to_string());
        assert!(!format!("{:?}", secret).contains("hunter2"));
        assert!(!format!("{:?}", code).contains("abc"));
    }

    #[test]
    fn expiry_is_in_the_future() {
        struct OneMinute;
        impl Expire for OneMinute {
            const EXPIRES_IN_SECS: u64 = 60;
        }

        let now = Utc::now().timestamp() as u64;
        let expiry = OneMinute::expiry().as_secs();
        assert!(expiry >= now + 59 && expiry <= now + 61);
    }
}
