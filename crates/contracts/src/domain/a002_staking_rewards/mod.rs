pub mod aggregate;
pub use aggregate::{StakingPosition, StakingRewardsInfo};
