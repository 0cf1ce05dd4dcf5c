mod weather_request;

pub use weather_request::*;
