mod macros;

pub mod ast;
pub mod error;
pub mod export;
pub mod lexer;
pub mod parser;
pub mod properties;
pub mod resolver;
pub mod utils;
pub mod config;

pub use ast::{Kind, Section, Value};
pub use error::IniError;
pub use config::Ini;
pub use parser::NO_SECTION;
