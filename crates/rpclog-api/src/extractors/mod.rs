//! Request extractors

mod pagination;

pub use pagination::{Pagination, PaginationParams};
