use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::leadmodel::InquiryType;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateLeadDto {
    pub inquiry_type: InquiryType,

    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "A valid email is required"))]
    pub email: String,

    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,

    /// Slug of the listing the form was shown on; absent or empty for the
    /// generic contact form.
    pub origin_slug: Option<String>,
}
