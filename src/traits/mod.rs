pub mod component;
pub mod device;
pub mod registry;

pub use component::{Component, Instance};
pub use device::{Axis, Camera, Daq, DiscreteAxis, Laser};
pub use registry::{Constructor, TypeRegistry};
