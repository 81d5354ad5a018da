use std::str::FromStr;

use pep440_rs::VersionSpecifiers;
use thiserror::Error;

use crate::identity::SPECIFIER_OPERATORS;

#[derive(Error, Debug)]
pub enum SpecifierError {
    /// The specifier does not parse under the PEP 440 grammar. The reason
    /// carries the grammar's own message so the user sees what the parser
    /// actually objected to.
    #[error("Invalid version specifier '{specifier}': {reason}")]
    InvalidSpecifier { specifier: String, reason: String },
}

/// Normalize a raw version token into a full version specifier.
///
/// A bare version such as `4.2.0` gets an implicit `==` operator; tokens
/// that already start with an operator pass through unchanged. The result
/// is validated against the PEP 440 specifier grammar, including
/// multi-clause forms such as `>=4.0.0,<5.0.0`.
pub fn normalize_specifier(raw: &str) -> Result<String, SpecifierError> {
    let raw = raw.trim();

    let normalized = if SPECIFIER_OPERATORS.iter().any(|op| raw.starts_with(op)) {
        raw.to_string()
    } else {
        format!("=={raw}")
    };

    VersionSpecifiers::from_str(&normalized).map_err(|err| SpecifierError::InvalidSpecifier {
        specifier: normalized.clone(),
        reason: err.to_string(),
    })?;

    Ok(normalized)
}
