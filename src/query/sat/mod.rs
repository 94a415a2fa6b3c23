//! Application of the Separating-Axis-Theorem to shapes exposing candidate
//! axes.

pub use self::sat::{find_local_separating_axis, sat_support_map_support_map};

mod sat;
