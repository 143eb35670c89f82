#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed pod descriptor at item {index}: {source}")]
    MalformedPod {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
