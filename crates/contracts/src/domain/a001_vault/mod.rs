pub mod aggregate;
pub use aggregate::VaultDescriptor;
