use codegate_types::TokenError;
use thiserror::Error;

pub use codegate_types::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Token required")]
    MissingToken,

    #[error("Invalid token")]
    InvalidSignature,

    #[error("Invalid token type")]
    WrongTokenType,

    #[error("Token has expired")]
    Expired,

    #[error("Your free requests are over, you need to register a full account")]
    QuotaExceeded,

    #[error("Wrong code")]
    WrongCode,

    #[error("Code lifetime is expired")]
    CodeNotFound,

    #[error("Token not found, re-login please!")]
    IdentityNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dependency unavailable: {0}")]
    DependencyUnavailable(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::MissingToken => ErrorCode::MissingToken,
            AppError::InvalidSignature => ErrorCode::InvalidToken,
            AppError::WrongTokenType => ErrorCode::InvalidTokenType,
            AppError::Expired => ErrorCode::TokenExpired,
            AppError::QuotaExceeded => ErrorCode::QuotaExceeded,
            AppError::WrongCode => ErrorCode::WrongCode,
            AppError::CodeNotFound => ErrorCode::CodeNotFound,
            AppError::IdentityNotFound => ErrorCode::IdentityNotFound,
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::DependencyUnavailable(_) => ErrorCode::InternalError,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            // Unreadable claim sets are treated like an absent token.
            TokenError::Missing | TokenError::Malformed(_) => AppError::MissingToken,
            TokenError::InvalidSignature => AppError::InvalidSignature,
            TokenError::WrongType { .. } => AppError::WrongTokenType,
            TokenError::Expired => AppError::Expired,
            TokenError::KeyMaterial(msg) | TokenError::Signing(msg) => {
                AppError::DependencyUnavailable(msg)
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
