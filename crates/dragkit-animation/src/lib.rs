//! Animation system for dragkit
//!
//! Provides spring physics driven by the runtime [`FrameClock`]:
//!
//! - [`AnimatedValue`]: a shared scalar that can be set directly or sprung
//!   toward a target with an initial velocity, with a settle callback
//! - [`AnimatedOffset`]: a pair of independently animated scalars, one per axis
//! - [`animate_spring_pair`]: springs both axes and reports settle once
//!
//! [`FrameClock`]: dragkit_core::FrameClock

mod animated_value;
mod spring;
mod spring_pair;

pub use animated_value::AnimatedValue;
pub use spring::{SpringSpec, SpringStep};
pub use spring_pair::{animate_spring_pair, AnimatedOffset};

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
