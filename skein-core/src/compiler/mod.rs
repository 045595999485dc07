pub mod lexer;
pub mod module;
pub mod parser;
pub mod printer;
