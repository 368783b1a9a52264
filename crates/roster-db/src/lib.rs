
pub mod connection;
pub use connection::Connection;

pub mod schema;

pub mod members;
