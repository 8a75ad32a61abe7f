mod request;
mod request_info;

pub use request::*;
pub use request_info::*;
