//! RS256 app assertion signing.

use jsonwebtoken::{Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::error::{Error, Result};

/// Sign `claims` with a PEM-encoded RSA private key, producing a compact
/// RS256 JWT (three dot-separated segments).
///
/// A new token is minted per call; claim freshness is the caller's job.
///
/// # Errors
/// Returns [`Error::KeyParse`] if the PEM is malformed or not an RSA private
/// key, and [`Error::Signing`] if encoding fails.
pub fn sign_claims<C: Serialize>(private_key_pem: &SecretString, claims: &C) -> Result<String> {
    let key = EncodingKey::from_rsa_pem(private_key_pem.expose_secret().as_bytes())
        .map_err(Error::KeyParse)?;

    jsonwebtoken::encode(&Header::new(Algorithm::RS256), claims, &key).map_err(Error::Signing)
}
