pub mod config;
pub mod error;
pub mod logging;

pub mod app;
pub mod catalog;
pub mod lifetime;
pub mod tally;

pub use app::App;
pub use error::{Error, Result};
pub use lifetime::{Cancelled, Lifetime};
