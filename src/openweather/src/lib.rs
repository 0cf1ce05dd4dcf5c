#![deny(rust_2018_idioms)]

mod client;
mod error;
mod models;
mod settings;

pub use reqwest::StatusCode;

pub use client::OpenWeatherClient;
pub use error::{Error, Result};
pub use settings::Settings;
