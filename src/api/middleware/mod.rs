pub mod errors;
pub mod logging;

pub use errors::{handle_panic, method_not_allowed_body};
pub use logging::logging_middleware;
