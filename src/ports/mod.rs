//! Ports (trait boundaries) for external dependencies.
//!
//! The simulation core never prints, paces, or records anything itself; it
//! reports events through the [`Observer`] port and adapters decide what to
//! do with them.

pub mod observer;

pub use observer::Observer;
