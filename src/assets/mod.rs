pub mod decode;
pub mod format;
