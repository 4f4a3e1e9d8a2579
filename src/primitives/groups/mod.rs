/// RFC 5114 MODP groups with prime-order subgroups.
pub mod rfc5114;

pub use rfc5114::{Rfc5114Group, TestVector};
