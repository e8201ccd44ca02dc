// Shared domain types — used by both the sync layer and any consumer (CLI
// or otherwise). Neither layer depends on the other; both import from here.

pub mod area;
pub mod notification;
pub mod repair;
pub mod user;

pub use area::*;
pub use notification::*;
pub use repair::*;
pub use user::*;
