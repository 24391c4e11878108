pub mod ast;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod config;

pub use ast::{Block, Document, Relation, Value};
pub use error::BrikError;
pub use config::BrikConfig;
pub use export::Format;
pub use parser::parse;
