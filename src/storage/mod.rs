pub mod connection;
pub mod entity;
pub mod raw_store;
pub mod repository;

pub use connection::{open_profile_store, processed_db_path};
pub use raw_store::{FsProfileSource, ProfileSource};
