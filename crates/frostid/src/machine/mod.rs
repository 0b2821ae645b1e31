mod snowflake_machine;

pub use snowflake_machine::*;
