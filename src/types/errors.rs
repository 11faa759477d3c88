use thiserror::Error;

#[derive(Debug, Error)]
pub enum DayWindowError {
    #[error("Day window error: day [{0}] is outside 1..=31")]
    DayOutOfRange(u8),
}
