#[macro_use]
extern crate log;

pub mod body;
pub mod client;
pub mod error;
pub mod response;
pub mod settings;
pub mod transport;

pub use crate::client::JsonApiClient;
pub use crate::error::{ClientError, ClientResult};
pub use crate::response::Response;
pub use crate::transport::{Transport, TransportError};
