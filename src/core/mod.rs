pub mod currency;
pub mod error;
pub mod serializers;
pub mod timezone;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use timezone::{DateRange, RangeResolver, ResolvedInstantRange};
