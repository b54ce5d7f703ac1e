pub mod activity;
pub mod config;
pub mod view;

pub use activity::*;
pub use config::*;
pub use view::*;
