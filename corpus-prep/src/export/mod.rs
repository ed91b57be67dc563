mod summary;
mod vocab;
mod writer;

pub use summary::{ExtractionSummary, FormatSummary, SplitCounts};
pub use vocab::NodeTypeNumbering;
pub use writer::{DatasetWriter, PathSample, SampleRecord, VOCAB_FILE};
