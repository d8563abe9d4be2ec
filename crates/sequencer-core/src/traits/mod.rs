mod storage;

pub use storage::ISequencerStorage;
