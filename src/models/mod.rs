// Domain data models

pub mod activity;
pub mod day_label;
pub mod exercise_log;
pub mod plan;
pub mod progress;
pub mod recommendation;
pub mod user;
pub mod workout;

pub use activity::*;
pub use exercise_log::*;
pub use plan::*;
pub use progress::*;
pub use recommendation::*;
pub use user::*;
pub use workout::*;
