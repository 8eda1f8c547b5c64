pub mod html;

pub use html::{update_descriptions, update_tech_tags};
