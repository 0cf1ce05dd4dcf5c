#![deny(rust_2018_idioms)]

mod domain;
mod error;
mod export;
mod ports;
mod settings;
#[cfg(feature = "test")]
mod test_helper;

pub use domain::*;
pub use error::*;
pub use export::*;
pub use ports::*;
pub use settings::*;
#[cfg(feature = "test")]
pub use test_helper::*;
