pub mod gate;
pub mod watcher;
