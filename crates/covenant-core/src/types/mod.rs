mod date;
mod id;
mod timestamp;

pub use date::Date;
pub use id::Id;
pub use timestamp::Timestamp;

// the numeric backbone of term values and risk scores
pub use rust_decimal::Decimal;
pub use ulid::Ulid;
