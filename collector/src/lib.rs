pub mod career;
pub mod pipeline;
pub mod sink;
pub mod stratz;

mod error;
pub use error::{Error, Result};
