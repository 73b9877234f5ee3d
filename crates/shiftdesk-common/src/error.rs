use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid page cursor: {0}")]
    InvalidCursor(String),
}

pub type CommonResult<T> = std::result::Result<T, CommonError>;
