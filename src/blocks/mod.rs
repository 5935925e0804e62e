//! Reference drafters built on the pipeline.
//!
//! These are small, complete blocks: a plain rectangle, a folded waistband and
//! a straight skirt. Garment-specific formula tables for shirts, sleeves and
//! trousers follow the same pattern.

pub mod rectangle;
pub mod skirt;
pub mod waistband;

pub use rectangle::RectangleDrafter;
pub use skirt::SkirtDrafter;
pub use waistband::WaistbandDrafter;
