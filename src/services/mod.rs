pub mod elasticsearch;
pub mod ingestion;
pub mod query;
pub mod subjects;

