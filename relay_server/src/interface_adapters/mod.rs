pub mod codec;
pub mod net;
pub mod protocol;
pub mod utils;
