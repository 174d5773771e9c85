// Resume field extraction engine.
// Pure and synchronous: text in, `ExtractionResult` out. No I/O happens here;
// decoding uploads and storing them is the job of `documents` and `storage`.

pub mod dates;
pub mod education;
pub mod experience;
pub mod extractor;
pub mod models;
pub mod name;
pub mod normalize;
pub mod scalar;
pub mod vocabulary;

pub use extractor::ResumeExtractor;
pub use models::ExtractionResult;
pub use vocabulary::ExtractorConfig;
