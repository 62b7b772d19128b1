pub mod dashboard;
pub mod domain_filter;
mod error;
pub mod pagination;
pub mod period;
pub mod reporting;
mod session;
pub mod user;

pub use domain_filter::{SiteRow, filter_by_user_domains};
pub use error::{Error, Result};
pub use session::{INVALID_CREDENTIALS, SESSION_COOKIE_NAME, decode_session, encode_session};
pub use user::{CurrentUser, NewUser, Role, UserRecord, UserSummary};

// FIXME: We can do this better I think.
#[doc(hidden)]
pub use anyhow::anyhow as internal_anyhow_dont_use;
