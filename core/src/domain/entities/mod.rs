//! Domain entities representing core business objects.

pub mod external_login;
pub mod user;
pub mod user_token;

// Re-export commonly used types
pub use external_login::{ExternalLogin, LoginProviderType};
pub use user::{UserAccount, UserStatus, MAX_LOGIN_ATTEMPTS};
pub use user_token::{UserToken, UserTokenType};
