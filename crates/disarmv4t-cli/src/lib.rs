pub mod model;
pub mod report;

pub use model::{load_raw_bin, slice_image, Image, LoadError};
pub use report::{write_json, write_text, Template, TemplateError, DEFAULT_TEMPLATE, MAX_WIDTH};
