pub mod geo;
pub mod sphere;
pub mod vec;

pub use geo::*;
pub use sphere::*;
pub use vec::*;
