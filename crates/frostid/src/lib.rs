mod error;
mod id;
mod machine;
mod time;

pub use crate::error::*;
pub use crate::id::*;
pub use crate::machine::*;
pub use crate::time::*;
