pub mod client;
pub mod models;
pub mod steamgrid;

pub use client::SourceClient;
pub use models::ApiConfig;
pub use steamgrid::CoverArtClient;
