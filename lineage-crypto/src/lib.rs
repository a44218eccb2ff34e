pub mod address;
pub mod encryption;
pub mod hash;
pub mod hd;
pub mod keys;
pub mod seed;
pub mod suri;
