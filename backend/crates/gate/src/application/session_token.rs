//! Session Cookie Tokens
//!
//! The gateway's own session cookie carries `"{session_id}.{signature}"`:
//! the session UUID signed with HMAC-SHA-256 under the configured secret.
//! Not to be confused with the backend bearer tokens the gate merely
//! classifies; these tokens are minted and verified here.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use kernel::id::SessionId;
use sha2::Sha256;

use crate::error::{GateError, GateResult};

/// Generate a signed session token
pub fn issue(session_id: SessionId, secret: &[u8; 32]) -> String {
    let session_id = session_id.to_string();

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, URL_SAFE_NO_PAD.encode(signature))
}

/// Parse and verify a session token
///
/// The signature is checked before the session ID is even parsed.
pub fn verify(token: &str, secret: &[u8; 32]) -> GateResult<SessionId> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 2 {
        return Err(GateError::SessionInvalid);
    }

    let session_id_str = parts[0];
    let signature_b64 = parts[1];

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id_str.as_bytes());

    let signature = URL_SAFE_NO_PAD
        .decode(signature_b64)
        .map_err(|_| GateError::SessionInvalid)?;

    mac.verify_slice(&signature)
        .map_err(|_| GateError::SessionInvalid)?;

    session_id_str
        .parse::<uuid::Uuid>()
        .map(SessionId::from_uuid)
        .map_err(|_| GateError::SessionInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_issue_verify_roundtrip() {
        let session_id = SessionId::new();
        let token = issue(session_id, &SECRET);

        let verified = verify(&token, &SECRET).unwrap();
        assert_eq!(verified, session_id);
    }

    #[test]
    fn test_verify_rejects_tampered_id() {
        let token = issue(SessionId::new(), &SECRET);
        let other = SessionId::new().to_string();
        let signature = token.split('.').nth(1).unwrap();

        let forged = format!("{}.{}", other, signature);
        assert!(matches!(
            verify(&forged, &SECRET),
            Err(GateError::SessionInvalid)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue(SessionId::new(), &SECRET);
        let other_secret = [9u8; 32];

        assert!(verify(&token, &other_secret).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_shape() {
        assert!(verify("", &SECRET).is_err());
        assert!(verify("no-dot-here", &SECRET).is_err());
        assert!(verify("a.b.c", &SECRET).is_err());
    }
}
