pub mod entry;
pub mod project;
pub mod project_skill;
pub mod skill;
pub mod user;

pub mod prelude;

pub use prelude::*;
