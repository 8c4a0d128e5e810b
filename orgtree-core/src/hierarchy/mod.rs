//! Hierarchy assembly from a manager structure.
//!
//! Two modes share the same node emission: [`assemble_department`] lays out
//! a whole department from its roots down, and [`assemble_chain`] isolates
//! one manager with every ancestor above and every descendant below. Each
//! call builds a fresh [`crate::HierarchyGraph`] whose ids start at 0.

mod chain;
mod department;
mod emit;

pub use self::{
    chain::{assemble_chain, assemble_chain_with},
    department::assemble_department,
};
