mod config;
mod iterator;
mod range;
mod walker;

pub use config::PaginationConfig;
pub use iterator::PageIterator;
pub use range::RangeIndicator;
pub use walker::{PageWalk, StopReason, walk_pages};
