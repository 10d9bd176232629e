pub mod claim;
pub mod components;
pub mod morph;
pub mod point_cloud;
pub mod prefabs;
pub mod series;

pub use claim::*;
pub use morph::*;
pub use point_cloud::*;
pub use series::*;
