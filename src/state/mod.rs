pub mod app;
pub mod coaching;
