#![doc = include_str!("../README.md")]

pub mod annotations;
pub mod common;
pub mod error;
pub mod io;
pub mod ontology;
pub mod predicate;
pub mod prelude;
pub mod property;
pub mod term;
pub mod term_id;

pub use term_id::{Identified, TermId};
