pub mod cli;
pub mod extract;
pub mod model;
pub mod parse;
pub mod resolve;
pub mod util;
pub mod walker;
