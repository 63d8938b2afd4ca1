pub mod error;

pub use error::{SealError, SealResult};
