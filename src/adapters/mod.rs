// Adapters layer: concrete company sources behind the CompanySource port.

pub mod memory;
pub mod rest;

pub use memory::MemoryDirectory;
pub use rest::RestDirectory;
