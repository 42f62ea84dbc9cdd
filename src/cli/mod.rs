mod root;
mod browse;
mod schema;

pub use root::Cli;
pub use browse::BrowseCommand;
pub use schema::SchemaCommand;
