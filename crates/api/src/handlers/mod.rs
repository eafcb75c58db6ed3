pub mod channel;
pub mod faq;
pub mod import;
pub mod plan;
