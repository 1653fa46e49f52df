#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid path data: {message}")]
    Parse { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
