//! Token extraction utilities.

use codegate_types::bearer_token;

/// Trait for accessing HTTP headers in a framework-agnostic way.
///
/// Implement this trait for your framework's header type to use
/// `CodegateClient::authenticate()`.
///
/// # Example
///
/// ```rust,ignore
/// use codegate_sdk::Headers;
///
/// // For axum
/// impl Headers for axum::http::HeaderMap {
///     fn get_authorization(&self) -> Option<&str> {
///         self.get("authorization")
///             .and_then(|v| v.to_str().ok())
///     }
/// }
/// ```
pub trait Headers {
    /// Get the Authorization header value.
    fn get_authorization(&self) -> Option<&str>;
}

/// Extract the access token from the request headers, if any.
pub fn extract_token<H: Headers>(headers: &H) -> Option<&str> {
    headers.get_authorization().and_then(bearer_token)
}
