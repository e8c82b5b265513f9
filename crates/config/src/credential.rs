//! Credentials for the remote analysis engine

use dfm_types::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker for placeholder tokens shipped in sample configuration files
pub const PLACEHOLDER_PREFIX: &str = "WARNING-INSECURE-DEFAULT";

/// Where the engine bearer token comes from
///
/// Configured as `{"type": "env", "value": "DFM_ENGINE_TOKEN"}` or
/// `{"type": "plain", "value": "<token>"}`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum EngineCredential {
	/// Name of an environment variable read at engine construction
	Env(String),
	/// Token written directly in the configuration
	Plain(String),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CredentialError {
	#[error("Engine token variable '{name}' is not set")]
	MissingVariable { name: String },

	#[error("Engine token is empty")]
	Empty,
}

impl EngineCredential {
	/// Read the token, never returning an empty one
	pub fn resolve(&self) -> Result<SecretString, CredentialError> {
		let token = match self {
			Self::Env(name) => std::env::var(name)
				.map_err(|_| CredentialError::MissingVariable { name: name.clone() })?,
			Self::Plain(token) => token.clone(),
		};
		if token.trim().is_empty() {
			return Err(CredentialError::Empty);
		}
		Ok(SecretString::new(token))
	}

	pub fn is_placeholder(&self) -> bool {
		matches!(self, Self::Plain(token) if token.starts_with(PLACEHOLDER_PREFIX))
	}

	/// Where the token is read from, without the token itself
	pub fn source(&self) -> String {
		match self {
			Self::Env(name) => format!("environment variable '{}'", name),
			Self::Plain(_) if self.is_placeholder() => "sample placeholder token".to_string(),
			Self::Plain(_) => "inline token".to_string(),
		}
	}
}

impl fmt::Debug for EngineCredential {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Env(name) => f.debug_tuple("Env").field(name).finish(),
			Self::Plain(_) => f.write_str("Plain([REDACTED])"),
		}
	}
}
