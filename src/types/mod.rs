mod day_window;
mod errors;

pub use day_window::DayWindow;
pub use errors::DayWindowError;

pub type CardId = u32;
pub type CounterpartId = u32;
pub type TransactionId = u32;
pub type ReminderId = u32;
