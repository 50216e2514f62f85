// src/scheduler/signature.rs
//
// Verifies the `Upstash-Signature` header on scheduler callbacks: an HS256 JWT
// whose `body` claim is the base64url SHA-256 of the request body. Either of the
// two signing keys may have produced it, so keys can be rotated without downtime.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::Error;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "Upstash-Signature";
const EXPECTED_ISSUER: &str = "Upstash";

#[derive(Debug, Deserialize)]
struct JwtHeader {
    alg: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    iss: String,
    #[serde(default)]
    sub: Option<String>,
    exp: i64,
    nbf: i64,
    body: String,
}

#[derive(Clone)]
pub struct SignatureVerifier {
    current_signing_key: String,
    next_signing_key: String,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    pub fn new(current_signing_key: impl Into<String>, next_signing_key: impl Into<String>) -> Self {
        Self {
            current_signing_key: current_signing_key.into(),
            next_signing_key: next_signing_key.into(),
        }
    }

    /// `url`, when given, must equal the token's `sub` claim.
    /// `now` is epoch seconds.
    pub fn verify(&self, signature: &str, body: &[u8], url: Option<&str>, now: i64) -> Result<(), Error> {
        match verify_with_key(&self.current_signing_key, signature, body, url, now) {
            Ok(()) => Ok(()),
            Err(first) => {
                debug!("Current signing key rejected signature ({}), trying next key", first);
                verify_with_key(&self.next_signing_key, signature, body, url, now)
            }
        }
    }
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, Error> {
    URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .map_err(|e| Error::Auth(format!("Malformed signature segment: {}", e)))
}

fn verify_with_key(key: &str, token: &str, body: &[u8], url: Option<&str>, now: i64) -> Result<(), Error> {
    let mut parts = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(sig_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(Error::Auth("Signature is not a JWT".into()));
    };

    let header: JwtHeader = serde_json::from_slice(&decode_segment(header_b64)?)
        .map_err(|e| Error::Auth(format!("Bad JWT header: {}", e)))?;
    if header.alg != "HS256" {
        return Err(Error::Auth(format!("Unsupported JWT algorithm {}", header.alg)));
    }

    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| Error::Auth(format!("Bad signing key: {}", e)))?;
    mac.update(header_b64.as_bytes());
    mac.update(b".");
    mac.update(payload_b64.as_bytes());
    mac.verify_slice(&decode_segment(sig_b64)?)
        .map_err(|_| Error::Auth("Invalid signature".into()))?;

    let claims: Claims = serde_json::from_slice(&decode_segment(payload_b64)?)
        .map_err(|e| Error::Auth(format!("Bad JWT claims: {}", e)))?;

    if claims.iss != EXPECTED_ISSUER {
        return Err(Error::Auth(format!("Unexpected issuer {}", claims.iss)));
    }
    if claims.nbf > now {
        return Err(Error::Auth("Token not yet valid".into()));
    }
    if claims.exp <= now {
        return Err(Error::Auth("Token expired".into()));
    }
    if let (Some(expected), Some(sub)) = (url, claims.sub.as_deref()) {
        if sub != expected {
            return Err(Error::Auth(format!("Token subject {} does not match {}", sub, expected)));
        }
    }

    let body_hash = URL_SAFE_NO_PAD.encode(Sha256::digest(body));
    if claims.body.trim_end_matches('=') != body_hash {
        return Err(Error::Auth("Body hash mismatch".into()));
    }
    Ok(())
}
