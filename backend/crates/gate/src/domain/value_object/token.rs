//! Token Classification
//!
//! Classifies raw token strings by structural shape only. No decoding,
//! no signature or expiry check; the auth backend is the authority on
//! whether a token is actually good.

use derive_more::Display;

/// Shortest string accepted as a verification token
pub const VERIFICATION_TOKEN_MIN_LEN: usize = 16;
/// Longest string accepted as a verification token
pub const VERIFICATION_TOKEN_MAX_LEN: usize = 128;

/// Structural token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    /// Three dot-separated base64url segments
    #[display("jwt")]
    Jwt,
    /// Opaque email-verify / password-reset style token
    #[display("verification")]
    Verification,
    /// Neither of the above
    #[display("invalid")]
    Invalid,
}

impl TokenKind {
    /// Classify a raw token string
    ///
    /// `Jwt` if [`is_jwt_token`] holds; otherwise `Verification` when the
    /// length is in `[16, 128]`; otherwise `Invalid`.
    pub fn classify(raw: &str) -> TokenKind {
        if is_jwt_token(raw) {
            TokenKind::Jwt
        } else if (VERIFICATION_TOKEN_MIN_LEN..=VERIFICATION_TOKEN_MAX_LEN).contains(&raw.len()) {
            TokenKind::Verification
        } else {
            TokenKind::Invalid
        }
    }
}

/// Whether a string has the shape of a JWT
///
/// True iff the input splits into exactly three dot-separated, non-empty
/// segments, each restricted to the base64url alphabet `[A-Za-z0-9_-]`.
pub fn is_jwt_token(raw: &str) -> bool {
    let mut segments = 0;

    for segment in raw.split('.') {
        segments += 1;
        if segments > 3 || segment.is_empty() || !is_base64url(segment) {
            return false;
        }
    }

    segments == 3
}

fn is_base64url(segment: &str) -> bool {
    segment
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Log token diagnostics without leaking the token
///
/// Emits only kind, length, and an 8-character prefix.
pub fn log_token_info(raw: &str, context: &str) {
    let prefix: String = raw.chars().take(8).collect();

    tracing::debug!(
        kind = %TokenKind::classify(raw),
        length = raw.len(),
        prefix = %prefix,
        context,
        "Token inspected"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_jwt_token() {
        assert!(is_jwt_token("eyJhbGci.eyJzdWIi.c2lnbmF0dXJl"));
        assert!(is_jwt_token("a.b.c"));
        assert!(is_jwt_token("A-_9.B-_8.C-_7"));
    }

    #[test]
    fn test_is_jwt_token_rejects_wrong_segment_count() {
        assert!(!is_jwt_token("a.b"));
        assert!(!is_jwt_token("a.b.c.d"));
        assert!(!is_jwt_token("abc"));
        assert!(!is_jwt_token(""));
    }

    #[test]
    fn test_is_jwt_token_rejects_empty_segments() {
        assert!(!is_jwt_token("a..c"));
        assert!(!is_jwt_token(".b.c"));
        assert!(!is_jwt_token("a.b."));
    }

    #[test]
    fn test_is_jwt_token_rejects_non_base64url() {
        assert!(!is_jwt_token("a+b.c.d"));
        assert!(!is_jwt_token("a.b=.c"));
        assert!(!is_jwt_token("a.b c.d"));
    }

    #[test]
    fn test_classify_jwt() {
        assert_eq!(TokenKind::classify("a.b.c"), TokenKind::Jwt);
    }

    #[test]
    fn test_classify_verification_by_length() {
        // 16 and 128 chars inclusive, not JWT-shaped
        assert_eq!(TokenKind::classify(&"x".repeat(16)), TokenKind::Verification);
        assert_eq!(
            TokenKind::classify(&"x".repeat(128)),
            TokenKind::Verification
        );
        // Shape beats length: a 20-char JWT is a JWT
        assert_eq!(
            TokenKind::classify("aaaaaa.bbbbbb.cccccc"),
            TokenKind::Jwt
        );
    }

    #[test]
    fn test_classify_invalid() {
        assert_eq!(TokenKind::classify(""), TokenKind::Invalid);
        assert_eq!(TokenKind::classify(&"x".repeat(15)), TokenKind::Invalid);
        assert_eq!(TokenKind::classify(&"x".repeat(129)), TokenKind::Invalid);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::Jwt.to_string(), "jwt");
        assert_eq!(TokenKind::Verification.to_string(), "verification");
        assert_eq!(TokenKind::Invalid.to_string(), "invalid");
    }
}
