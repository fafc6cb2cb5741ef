//! Configuration module

mod site;

pub use site::{
    About, Appearance, Experience, HighlightConfig, SiteConfig, SocialLinks, CONFIG_FILES,
};
