pub mod document_source;
