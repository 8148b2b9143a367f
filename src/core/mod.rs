pub mod extractor;
pub mod parser;
pub mod playlist;
pub mod publisher;
pub mod resolver;
pub mod tagger;
