pub mod campaign;
pub mod draw;
pub mod entries;
pub mod import;
