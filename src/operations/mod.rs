pub mod intersect;
pub mod validity;
