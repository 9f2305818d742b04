pub mod access;
pub mod sessions;
pub mod synonyms;
