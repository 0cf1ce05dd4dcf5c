mod inbound;
mod outbound;

pub use inbound::*;
pub use outbound::*;

pub trait WebApiPort: WeatherRequestInbound + WeatherRequestOutbound {}

impl<T> WebApiPort for T where T: WeatherRequestInbound + WeatherRequestOutbound {}
