pub mod builder;
pub mod conferences;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetcher;
pub mod frame;
pub mod logging;
pub mod parser;
pub mod season;
pub mod team;
pub mod teams;
pub mod types;

pub use error::{Result, ScraperError};
pub use frame::DataFrame;
pub use team::Team;
pub use teams::{Sources, Teams};
