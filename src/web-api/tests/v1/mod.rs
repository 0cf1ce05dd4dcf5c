pub mod export;
pub mod frontend;
pub mod helper;
pub mod lookup;
