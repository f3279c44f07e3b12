// src/runner/mod.rs
pub mod executor;
pub mod validator;

pub use executor::{RunOutput, ScriptRunner};
pub use validator::SyntaxValidator;
