//! Errors raised while attaching an overlay to a host element.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why one element could not be set up. Never fatal to other attachments.
#[derive(Error, Debug)]
pub enum AttachError {
	/// The element has no `data-anim-config` attribute.
	#[error("missing data-anim-config attribute")]
	MissingConfig,

	/// The attribute is not valid configuration JSON.
	#[error("invalid animation config: {0}")]
	InvalidConfig(#[from] serde_json::Error),

	/// The canvas refused a 2D rendering context.
	#[error("canvas has no 2d context")]
	NoContext,

	/// A DOM call threw.
	#[error("DOM error: {0}")]
	Dom(String),
}

impl From<JsValue> for AttachError {
	fn from(value: JsValue) -> Self {
		Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type Result<T> = std::result::Result<T, AttachError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn json_errors_convert() {
		let err: AttachError = serde_json::from_str::<serde_json::Value>("{")
			.unwrap_err()
			.into();
		assert!(matches!(err, AttachError::InvalidConfig(_)));
		assert!(err.to_string().starts_with("invalid animation config"));
	}

	#[test]
	fn messages() {
		assert_eq!(
			AttachError::MissingConfig.to_string(),
			"missing data-anim-config attribute"
		);
		assert_eq!(
			AttachError::Dom("boom".into()).to_string(),
			"DOM error: boom"
		);
	}
}
