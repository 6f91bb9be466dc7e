//! Utilities shared by the solver modules

pub mod memo;
pub(crate) mod parse;
