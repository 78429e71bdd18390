pub mod auth;
pub mod convert;
pub mod docs;
pub mod settings;
pub mod writer;
