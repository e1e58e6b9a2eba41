mod error;
mod id;
mod image;
mod requests;
mod share;
mod sorting;
mod types;

pub use error::{ImageError, ValidationError};
pub use id::{generate_guest_id, to_base36, RANDOM_SUFFIX_LEN};
pub use image::{
    content_type_for_extension, encode_data_url, is_image_content_type, is_inline_image,
    parse_image, ImagePayload,
};
pub use requests::{
    CreateGuestRequest, CreateGuestResponse, DeleteGuestQuery, DeleteGuestResponse, ErrorResponse,
};
pub use share::{thank_you_link, THANK_YOU_PATH};
pub use sorting::sort_newest_first;
pub use types::{GuestRecord, NewGuest};
