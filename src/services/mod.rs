pub mod budget_cache_service;
pub mod embedding_service;
pub mod groq_service;
pub mod prompt_service;
pub mod retrieval_service;
pub mod wiki_service;
