pub mod components;
pub mod number_format;
pub mod services;
pub mod web3;
