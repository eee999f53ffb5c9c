use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("could not parse {what} from {input:?}")]
    InvalidInput { what: &'static str, input: String },

    #[error("boundary must be finite, got {0}")]
    NonFiniteBoundary(f64),

    #[error("thread count must be greater than 0")]
    ZeroThreads,

    #[error("no thread counts to run")]
    NoThreadCounts,

    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker {0} panicked")]
    WorkerPanicked(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
