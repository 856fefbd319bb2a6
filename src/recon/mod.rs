pub mod error;
pub mod identity;
pub mod leave_index;
pub mod process;
pub mod status;
pub mod store;
pub mod window;
