//! Credential holder for engine API keys
//!
//! The value is zeroized on drop and never shows up in `Debug`, `Display`
//! or serialized settings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string that must not leak into logs
///
/// ```rust
/// use dfm_types::SecretString;
///
/// let key = SecretString::from("engine-token");
/// assert_eq!(key.expose_secret(), "engine-token");
/// assert_eq!(format!("{:?}", key), "SecretString([REDACTED])");
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString {
	inner: String,
}

impl SecretString {
	pub fn new(secret: String) -> Self {
		Self { inner: secret }
	}

	/// Access the raw value; keep the borrow short
	pub fn expose_secret(&self) -> &str {
		&self.inner
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	/// `Authorization` header value for bearer-token engines
	pub fn bearer_header(&self) -> String {
		format!("Bearer {}", self.inner)
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString([REDACTED])")
	}
}

impl fmt::Display for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("[REDACTED]")
	}
}

impl From<String> for SecretString {
	fn from(secret: String) -> Self {
		Self::new(secret)
	}
}

impl From<&str> for SecretString {
	fn from(secret: &str) -> Self {
		Self::new(secret.to_string())
	}
}

impl Serialize for SecretString {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str("[REDACTED]")
	}
}

impl<'de> Deserialize<'de> for SecretString {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		String::deserialize(deserializer).map(Self::new)
	}
}

impl PartialEq for SecretString {
	/// Constant-time over equal lengths
	fn eq(&self, other: &Self) -> bool {
		let (a, b) = (self.inner.as_bytes(), other.inner.as_bytes());
		a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
	}
}

impl Eq for SecretString {}
