pub mod buckets;
pub mod gaussian;
pub mod generator;
pub mod hotcold;
