pub mod rewards_tab;
