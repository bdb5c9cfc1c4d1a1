//! # rolegate-dashboard: Dashboard collaborators
//!
//! Small pieces the dashboard leans on around the permission core:
//! - [`activity`]: picks the icon shown next to an activity-feed entry
//! - [`proxy`]: the development proxy's route table and request logging

pub mod activity;
pub mod proxy;

pub use activity::{ActivityIcon, icon_for};
pub use proxy::{DevProxy, ForwardTarget};
