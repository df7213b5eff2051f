mod admin;
mod product;
mod review;

pub use admin::*;
pub use product::*;
pub use review::*;
