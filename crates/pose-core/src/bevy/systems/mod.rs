//! Systems for pose control.
//!
//! Organized by functionality:
//! - attach: Capture start poses and create controllers
//! - command: Command queue processing
//! - drive: Per-frame input sampling and controller ticks
//! - store_sync: Publish poses to the shared `PoseStore`

pub mod attach;
pub mod command;
pub mod drive;
pub mod store_sync;

pub use attach::*;
pub use command::*;
pub use drive::*;
pub use store_sync::*;
