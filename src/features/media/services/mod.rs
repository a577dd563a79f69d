pub mod extraction_service;

pub use extraction_service::IssueExtractionService;
