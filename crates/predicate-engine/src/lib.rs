//! Compiles filter trees into predicates over schema-typed records.

pub mod compiler;
pub mod error;
pub mod eval;
pub mod predicate;
pub mod resolver;
pub mod settings;

pub use compiler::{FilterCompiler, PredicateCompiler, compile, compile_for};
pub use error::{FilterError, NodeLocation, Result};
pub use predicate::{Predicate, TypedPredicate};
pub use settings::{CompileSettings, EmptyGroupPolicy};
