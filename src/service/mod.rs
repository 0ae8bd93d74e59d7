pub mod lead_form;
pub mod media;
