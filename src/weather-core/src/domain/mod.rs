mod date_range;
mod forecast;
mod weather_request;

pub use date_range::*;
pub use forecast::*;
pub use weather_request::*;
