pub mod record;
pub mod due;
pub mod selector;
