pub mod espolios;
pub mod ingest;
