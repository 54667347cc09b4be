mod address;
mod date;
mod euro;

pub use address::Address;
pub use date::{Date, ParseDateError};
pub use euro::{Euro, ParseEuroError};
