//! Use-case services over the engine.
//!
//! # Responsibility
//! - Apply transitions to live collections by entity id.
//! - Keep "one call = one mutation + one history append" atomic from the
//!   caller's point of view.

pub mod board;
