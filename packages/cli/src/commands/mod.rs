pub mod watch;

pub use watch::{watch, WatchArgs};
