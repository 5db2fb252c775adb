pub mod summarize_client;

pub use summarize_client::SummarizeClient;
