pub mod queries;
pub mod scrape;

pub use crate::domain::model::{ProductBase, ProductDetails, ProductSpecs, SearchRequest};
pub use crate::domain::ports::{ConfigProvider, PageQuery, QueryOptions, Storage};
pub use crate::utils::error::Result;
pub use scrape::ScrapeEngine;
