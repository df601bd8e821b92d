mod chat_completion;
mod common;
mod tools;

pub use chat_completion::*;
pub use common::Usage;
pub use tools::*;
