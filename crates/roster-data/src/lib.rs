// Operations
mod operations;
pub use operations::*;

mod errors;
pub use errors::*;

// Models
mod members;
pub use members::*;

mod payment;
pub use payment::*;

mod insights;
pub use insights::*;
