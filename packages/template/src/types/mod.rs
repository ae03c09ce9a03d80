mod demographics;
mod diagnostics;
mod parser;
mod presentation;
mod validation;

pub use demographics::*;
pub use diagnostics::*;
pub use parser::*;
pub use presentation::*;
pub use validation::*;
