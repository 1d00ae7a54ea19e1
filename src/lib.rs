pub mod action;
mod config;
mod error;
pub mod graphql;

pub use action::Action;
pub use config::Config;
pub use error::{Error, Result};
pub use graphql::Client;
