pub mod leaddtos;
pub mod listingdtos;
pub mod pageviewdtos;
