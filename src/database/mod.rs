pub mod connection;
pub mod subscription_store;

pub use connection::*;
pub use subscription_store::*;
