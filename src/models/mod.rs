pub mod leadmodel;
pub mod listingmodel;
pub mod pageviewmodel;
