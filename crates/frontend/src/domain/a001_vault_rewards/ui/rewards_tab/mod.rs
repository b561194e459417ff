//! Vault Rewards Tab UI Module
//!
//! Same MVVM split as the other detail views:
//! - model.rs: pure button/approval derivations
//! - controller.rs: async action orchestration over injected services
//! - view_model.rs: ViewModel with signals and commands
//! - view.rs: Leptos component (pure UI)

mod controller;
mod model;
mod view;
mod view_model;

pub use controller::RewardsController;
pub use model::{is_approved, ButtonState, PanelSnapshot};
pub use view::RewardsTab;
pub use view_model::RewardsTabViewModel;
