pub mod config;
pub mod paths;
pub mod process;

pub use config::*;
pub use paths::*;
pub use process::*;
