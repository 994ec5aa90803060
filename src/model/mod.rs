// MODEL: Camera pose, compass and animated scene values
pub mod camera;
pub mod compass;
pub mod gallery;

pub use camera::{Camera, CameraPose};
pub use compass::CompassHeading;
pub use gallery::{GalleryAnimation, PropId, SpinAxis};
