pub mod error;
pub mod bearing;
pub mod direction;
pub mod vectors;
pub mod coords;
pub mod particle;
pub mod fields;
pub mod universe;
pub mod scenario;
