pub mod compile;
pub mod detect;
pub mod generate;
pub mod validate;
pub mod vocabulary;
