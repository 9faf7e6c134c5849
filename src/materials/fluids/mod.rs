pub mod water;

pub use water::Water;
