pub mod export;
pub mod form;
pub mod project;
pub mod share;
