pub mod client;
pub mod controller;
pub mod rows;

pub use crate::domain::model::{decode_universities, University};
pub use crate::domain::ports::{ConfigProvider, LinkOpener, OrderingPolicy, SearchProvider};
pub use crate::utils::error::Result;
