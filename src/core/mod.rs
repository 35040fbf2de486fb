pub mod finder;

pub use finder::DupeFinder;
