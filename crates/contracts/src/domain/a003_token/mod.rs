pub mod aggregate;
pub use aggregate::TokenBalance;
