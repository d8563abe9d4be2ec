//! Connection management: one serialized connection, pragmas applied on open.

pub mod pragmas;
pub mod serial_connection;

pub use serial_connection::{SerialConnection, IN_MEMORY};
