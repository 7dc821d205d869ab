pub mod article;
pub mod config;
pub mod edit_distance;
pub mod error;
pub mod locator;
pub mod ranker;
pub mod reader;
pub mod sampler;
pub mod sanitizer;
pub mod sentence_segmenter;
pub mod sequence_ops;
pub mod tabular;

// Re-export one entry point per component
pub use article::{assemble, assemble_labeled, LabeledSentence};
pub use config::{SiftConfig, ValuePolicy};
pub use edit_distance::edit_distance;
pub use error::{Result, SiftError};
pub use locator::{locate, Interval};
pub use ranker::{rank, rank_json, JsonScalar, RankInput};
pub use sampler::{sample, WeightedItem, WeightedSampler};
pub use sanitizer::{sanitize, MarkupConverter, PlainTextConverter, SanitizeLevel, Sanitizer};
pub use sentence_segmenter::{segment, SegmenterRules, Sentence, SentenceSegmenter};
pub use sequence_ops::{chunk, dedupe, trim, trim_by_name, Blank, TrimCategory};

// Re-export file collaborators
pub use reader::{read_text, write_text, ReaderConfig, TextReader, WriteMode};
pub use tabular::{read_csv, write_csv, CsvReadOptions, ExportKind, Orientation, ReadLayout, Records};
