pub mod column_mapping;
pub mod contact;
pub mod template;
