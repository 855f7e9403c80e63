#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

use crate::error::WarrenError;

pub type WarrenResult<T> = std::result::Result<T, WarrenError>;
pub const JSON_API_HEADER: &str = "application/vnd.api+json";

#[macro_use]
pub mod macros;

pub mod entity;
pub mod error;
pub mod model;
pub mod query;
