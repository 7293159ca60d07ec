use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures of the browser glue. Core state machines never return these:
/// bad moves are outcomes, not errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("no global window")]
    NoWindow,
    #[error("no document on window")]
    NoDocument,
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{id} is not a {expected}")]
    WrongElement { id: String, expected: &'static str },
    #[error("unknown pack '{0}'")]
    UnknownPack(String),
    #[error("unknown section '{0}'")]
    UnknownSection(String),
    #[error("unknown game '{0}'")]
    UnknownGame(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for AppError {
    fn from(value: JsValue) -> Self {
        AppError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<AppError> for JsValue {
    fn from(err: AppError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
