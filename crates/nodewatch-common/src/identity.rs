//! Key material identifying mesh nodes and the monitor itself
//!
//! All keys travel as lower-case hex strings on the wire. A [`NodeIdentity`]
//! is a 33-byte compressed public key; the monitor additionally carries a
//! secret key and a precomputed signature used to authenticate registry
//! mutations.

use crate::impl_hex_key;

/// Errors produced when decoding hex-encoded key material
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// Decode a hex string into exactly `N` bytes.
pub fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], IdentityError> {
    let bytes = const_hex::decode(s).map_err(|e| IdentityError::InvalidHex(e.to_string()))?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| IdentityError::InvalidLength {
        expected: N,
        actual: bytes.len(),
    })
}

/// Public key of a node advertised in the registry
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdentity([u8; 33]);

impl_hex_key!(NodeIdentity, 33);

impl std::fmt::Debug for NodeIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeIdentity({})", self.to_hex())
    }
}

/// Secret key of the monitor. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; 32]);

impl_hex_key!(SecretKey, 32);

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Recoverable signature over the monitor's public key
#[derive(Clone, PartialEq, Eq)]
pub struct Signature([u8; 65]);

impl_hex_key!(Signature, 65);

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

/// Credentials the monitor presents to the registry when deregistering nodes.
///
/// Loaded once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorIdentity {
    pub public_key: NodeIdentity,
    pub secret_key: SecretKey,
    pub signature: Signature,
}

impl MonitorIdentity {
    pub fn new(public_key: NodeIdentity, secret_key: SecretKey, signature: Signature) -> Self {
        Self {
            public_key,
            secret_key,
            signature,
        }
    }

    /// Parse all three components from their hex forms
    pub fn from_hex(public_key: &str, secret_key: &str, signature: &str) -> Result<Self, IdentityError> {
        Ok(Self {
            public_key: public_key.parse()?,
            secret_key: secret_key.parse()?,
            signature: signature.parse()?,
        })
    }
}
