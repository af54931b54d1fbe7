pub mod lyon;
pub mod types;
pub mod value;
