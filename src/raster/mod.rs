pub mod indexed;
pub mod palette;
