//! Rule parsing and evaluation module
//!
//! This module turns rule strings like
//! `(age > 30 AND department = 'Sales') OR age < 25` into an AST, prints and
//! rebuilds that AST as text, and evaluates it against attribute records.

mod ast;
pub mod cache;
mod combiner;
mod evaluator;
pub mod parser;
mod printable;
pub mod tokenizer;
mod validate;
mod value;


pub use ast::*;
pub use cache::*;
pub use combiner::*;
pub use evaluator::*;
pub use parser::*;
pub use printable::*;
pub use tokenizer::*;
pub use validate::*;
pub use value::*;
