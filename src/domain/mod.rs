pub mod category;
pub mod product;
pub mod query;
