mod staff;

pub use staff::*;
