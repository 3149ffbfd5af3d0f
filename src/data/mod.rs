mod caption;
mod favorites;
mod image_ref;
mod storage;

pub use caption::{Caption, CaptionError};
pub use favorites::FavoritesList;
pub use image_ref::ImageRef;
pub use storage::{Storage, COUNTER_KEY, FAVORITES_KEY};
