use std::fmt;

/// Internal failures. None of these are shown to callers verbatim; the
/// protocol layer reports them as `server error`.
#[derive(Debug)]
pub enum Error {
    NotFound,
    Db(diesel::result::Error),
    Pool(diesel::r2d2::PoolError),
    Migration(diesel_migrations::RunMigrationsError),
    Random(rand::Error),
    Signing(jsonwebtoken::errors::Error),
    BadRedirect(url::ParseError),
    Encoding(serde_urlencoded::ser::Error),
    Poisoned,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("record not found"),
            Self::Db(e) => write!(f, "database error: {}", e),
            Self::Pool(e) => write!(f, "connection pool error: {}", e),
            Self::Migration(e) => write!(f, "migration error: {}", e),
            Self::Random(e) => write!(f, "random source failure: {}", e),
            Self::Signing(e) => write!(f, "token signing failure: {}", e),
            Self::BadRedirect(e) => write!(f, "registered redirect uri is invalid: {}", e),
            Self::Encoding(e) => write!(f, "could not encode redirect parameters: {}", e),
            Self::Poisoned => f.write_str("store lock poisoned"),
        }
    }
}

impl std::error::Error for Error {}

impl From<diesel::result::Error> for Error {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => Self::NotFound,
            e => Self::Db(e),
        }
    }
}

impl From<diesel::r2d2::PoolError> for Error {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        Self::Pool(e)
    }
}

impl From<diesel_migrations::RunMigrationsError> for Error {
    fn from(e: diesel_migrations::RunMigrationsError) -> Self {
        Self::Migration(e)
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self::Random(e)
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Self::BadRedirect(e)
    }
}

impl From<serde_urlencoded::ser::Error> for Error {
    fn from(e: serde_urlencoded::ser::Error) -> Self {
        Self::Encoding(e)
    }
}
