pub mod pipeline;
pub mod request;
