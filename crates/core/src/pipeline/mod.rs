pub mod crop_image_use_case;
pub mod extract_slides_use_case;
pub mod extraction_config;
pub mod pipeline_logger;
