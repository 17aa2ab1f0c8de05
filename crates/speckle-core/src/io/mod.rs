pub mod crop;
pub mod frames;
pub mod image_io;
pub mod results;
pub mod walker;
