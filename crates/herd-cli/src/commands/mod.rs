pub mod solve;
pub mod template;
pub mod validate;
