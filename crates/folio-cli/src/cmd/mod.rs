pub mod authors;
pub mod completions;
pub mod list;
pub mod render;
pub mod show;
pub mod theme;
