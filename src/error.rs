use thiserror::Error;

pub type StoryResult<T> = Result<T, StoryError>;

#[derive(Debug, Error)]
pub enum StoryError {
    #[error("no global window")]
    MissingWindow,

    #[error("window has no document")]
    MissingDocument,

    #[error("document has no body")]
    MissingBody,

    #[error("progress indicator `#{id}` is already installed")]
    DuplicateIndicator { id: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for StoryError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<StoryError> for wasm_bindgen::JsValue {
    fn from(err: StoryError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
