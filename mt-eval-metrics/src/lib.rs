pub mod aggregators;
pub mod calculators;
pub mod edit_distance;

pub use aggregators::*;
pub use calculators::*;
pub use edit_distance::*;
