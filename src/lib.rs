pub mod cli;
pub mod constants;
pub mod dom;
pub mod error;
pub mod logger;
pub mod modes;
pub mod output;
pub mod session;

// Exporting types for convenience
pub use cli::{Args, Mode, OutputFormat};
pub use error::ScrapeError;
pub use modes::Row;
pub use session::Session;
