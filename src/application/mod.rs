pub mod catalog;
pub mod cover_cache;
pub mod launcher;

pub use cover_cache::CoverCache;
pub use launcher::{launch_entry, Launcher, SystemLauncher};
