pub mod pipeline;
pub mod stats;
pub mod store;

pub use pipeline::{CollationError, TitleCollator, derive};
pub use stats::{Stats, stats};
pub use store::{ActivityStore, StoreError, ValidationError};
