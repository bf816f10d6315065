mod crosses;
mod sweepline;

pub use crosses::boundaries_cross;
pub use sweepline::{Intersection, SweeplineIntersector};
