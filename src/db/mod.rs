pub mod db;
pub mod leaddb;
pub mod listingdb;
pub mod pageviewdb;
