pub mod delete;
pub mod insert;
pub mod json;
pub mod select;
pub mod update;
