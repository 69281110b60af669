pub mod aggregate;
pub mod bins;
pub mod join;
pub mod loader;
pub mod output;
pub mod report;
pub mod utility;
