//! Control algorithms.
//!
//! Only one loop on this board: bang-bang relay control with a hysteresis
//! band ([`hysteresis`]).

pub mod hysteresis;
