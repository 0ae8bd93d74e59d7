pub mod leads;
pub mod listings;
pub mod views;
