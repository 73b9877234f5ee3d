pub mod api;
pub mod error;
pub mod feed;
pub mod models;
pub mod virtual_list;

pub use error::{CommonError, CommonResult};
pub use models::{Bucket, Record, RecordId, Shift};
