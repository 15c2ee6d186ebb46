pub mod device;
pub mod summary;
pub mod tui;
