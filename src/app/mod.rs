// Application layer: presentation of search results and company details.

pub mod render;
