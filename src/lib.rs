pub mod core;
pub mod digest;
pub mod error;
pub mod job_search;
pub mod pipeline;
pub mod utils;

pub use error::{DigestError, Result};
pub use pipeline::{run, RunReport};
