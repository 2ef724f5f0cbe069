mod in_memory_transcription_repository;

pub use in_memory_transcription_repository::InMemoryTranscriptionRepository;
