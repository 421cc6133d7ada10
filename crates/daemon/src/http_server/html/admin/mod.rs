pub mod devices;
pub mod files;
pub mod index;
pub mod reports;
pub mod settings;
