//! Database Models

pub mod serde_helpers;

pub mod attendance;
pub mod billing;
pub mod leave;
pub mod notification;
pub mod onboarding;
pub mod organization;
pub mod timesheet;
pub mod user;

pub use attendance::*;
pub use billing::*;
pub use leave::*;
pub use notification::*;
pub use onboarding::*;
pub use organization::*;
pub use timesheet::*;
pub use user::*;
