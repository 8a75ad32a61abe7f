mod factory;
mod func;
mod inject;
mod interface;
mod service;

pub use factory::*;
pub use func::*;
pub use inject::*;
pub use interface::*;
pub use service::*;
