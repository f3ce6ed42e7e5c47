pub mod date;
pub mod model;
pub mod richtext;
pub mod validate;
