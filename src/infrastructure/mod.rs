pub mod doc_parser;
pub mod doc_writer;

pub use doc_parser::ParserError;
pub use doc_writer::WriterError;
