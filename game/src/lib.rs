pub mod compositor;
pub mod config;
pub mod drawing;
pub mod grid;
pub mod playtest;
pub mod report;
pub mod scorer;
pub mod session;
pub mod snapshot;
pub mod speech;
pub mod state;
pub mod timer;
pub mod words;
