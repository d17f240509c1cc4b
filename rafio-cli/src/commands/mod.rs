//! Command implementations for the rafio CLI.

pub mod extract;
pub mod info;
pub mod list;

pub use extract::cmd_extract;
pub use info::cmd_info;
pub use list::cmd_list;
pub use test::cmd_test;
