//! Game implementations.

pub mod chopsticks;
