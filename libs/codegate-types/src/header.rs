//! Access token extraction from `Authorization` header values.

/// Returns the token part of an `Authorization` header value.
///
/// The last whitespace separated segment is taken, so both `Bearer <token>`
/// and a bare `<token>` are accepted.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    header_value.split_whitespace().last()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token("Bearer eyJtoken"), Some("eyJtoken"));
        assert_eq!(bearer_token("bearer   eyJtoken "), Some("eyJtoken"));
    }

    #[test]
    fn bare_token_is_accepted() {
        assert_eq!(bearer_token("eyJtoken"), Some("eyJtoken"));
    }

    #[test]
    fn blank_header_has_no_token() {
        assert_eq!(bearer_token(""), None);
        assert_eq!(bearer_token("   "), None);
    }
}
