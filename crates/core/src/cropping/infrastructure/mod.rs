pub mod border_cropper;
