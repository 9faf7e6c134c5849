// src/solver/mod.rs
pub mod g2p;
pub mod grid_update;
pub mod p2g;
pub mod stress;

// Re-export from the solver module
pub use g2p::*;
pub use grid_update::*;
pub use p2g::*;
pub use stress::*;
