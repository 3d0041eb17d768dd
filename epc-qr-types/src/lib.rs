mod ec;
mod euro;
mod purpose;

pub use ec::ErrorCorrection;
pub use euro::Euro;
pub use purpose::{describe_purpose, PURPOSE_CODES};
