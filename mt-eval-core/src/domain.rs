pub mod level;
pub mod metric;

pub use level::*;
pub use metric::*;
