use thiserror::Error;

/// Everything that can go wrong while setting up a scene or the waveform
/// player. None of it is fatal to the host page: the effects degrade to
/// drawing nothing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid color {0:?}")]
    Color(String),

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("javascript error: {0}")]
    Js(String),

    #[error("audio graph: {0}")]
    AudioGraph(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(target_arch = "wasm32")]
mod js {
    use super::Error;
    use wasm_bindgen::JsValue;

    impl From<JsValue> for Error {
        fn from(value: JsValue) -> Self {
            Error::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
        }
    }

    impl From<Error> for JsValue {
        fn from(err: Error) -> Self {
            js_sys::Error::new(&err.to_string()).into()
        }
    }
}
