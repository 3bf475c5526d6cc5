pub mod logger;
pub mod markup;
