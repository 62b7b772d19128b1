use serde::{Deserialize, Serialize};

/// A serializable error for client rendering.
///
/// When `RUST_BACKTRACE=1` is set, the message will include the full backtrace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Error {
    /// The error message (includes chain and backtrace from anyhow's Debug output)
    pub message: String,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<anyhow::Error> for Error {
    fn from(error: anyhow::Error) -> Self {
        // The Debug representation includes the error chain and backtrace
        Self {
            message: format!("{:?}", error),
        }
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self {
            message: s.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self { message: s }
    }
}

macro_rules! from_std_error {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Error {
                fn from(error: $ty) -> Self {
                    anyhow::Error::from(error).into()
                }
            }
        )*
    };
}

from_std_error!(
    std::io::Error,
    serde_json::Error,
    base64::DecodeError,
    std::string::FromUtf8Error,
    jiff::Error,
);

/// Build an [`Error`] from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from($crate::internal_anyhow_dont_use!($($arg)*))
    };
}
