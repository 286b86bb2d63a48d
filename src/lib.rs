pub mod cli;
pub mod committers;
pub mod error;
pub mod model;
pub mod paths;
pub mod render;
pub mod replay;
pub mod svn;
pub mod tree;
