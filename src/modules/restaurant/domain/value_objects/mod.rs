pub mod address;
pub mod cuisine;
pub mod rating;

pub use address::Address;
pub use cuisine::Cuisine;
pub use rating::Rating;
