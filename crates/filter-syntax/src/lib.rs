//! Filter tree vocabulary, representation and assembly.

pub mod ast;
pub mod builder;
pub mod errors;
pub mod macros;
pub mod printer;

pub use ast::{
    literal::Literal,
    node::{Condition, FilterNode, FilterValue, Group},
    operator::{CombineOperator, FilterOperator},
    path::{PathSegment, PropertyPath},
};
pub use builder::QueryBuilder;
pub use errors::SyntaxError;
