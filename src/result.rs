use crate::error::Error as OmenErr;
pub type Result<T> = std::result::Result<T, OmenErr>;
