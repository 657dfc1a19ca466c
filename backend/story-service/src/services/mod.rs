/// Business logic layer
pub mod catalog;
pub mod engagement;

pub use catalog::CatalogService;
pub use engagement::EngagementService;
