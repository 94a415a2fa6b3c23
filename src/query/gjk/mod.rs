//! The Gilbert-Johnson-Keerthi overlap test.

pub use self::gjk::{intersection_test, GJK_MAX_ITERATIONS};
pub use self::simplex::Simplex;

mod gjk;
mod simplex;
