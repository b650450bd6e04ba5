pub mod image_service;

pub use image_service::{parse_size, ConvertReport, ConvertRequest, ImageInfo, ImageService};
