pub mod gun;
pub mod plane;

pub use gun::GunTuning;
pub use plane::{PlaneModel, PlaneTuning};
