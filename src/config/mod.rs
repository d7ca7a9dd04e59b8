//! Configuration module

mod site;

pub use site::HighlightConfig;
pub use site::InvalidPostPolicy;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::SitemapRoute;
