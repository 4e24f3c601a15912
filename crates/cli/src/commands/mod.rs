pub mod assigns;
pub mod config;
pub mod graph;
pub mod impact;
pub mod util;

pub use assigns::*;
pub use config::*;
pub use graph::*;
pub use impact::*;
pub use util::*;
