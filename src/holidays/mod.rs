//! Holiday data: external sources, the year-keyed cache, and the provider
//! that ties them together.

pub mod cache;
pub mod provider;
pub mod source;

pub use cache::HolidayCache;
pub use provider::{FetchFailure, HolidayProvider, MAX_CONCURRENT_FETCHES};
pub use source::{HolidaySource, HttpHolidaySource, MockHolidaySource};
