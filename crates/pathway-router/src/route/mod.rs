/// Route patterns: parsing, compilation and generation
///
/// Pure functional components, leaves first:
/// - `pattern` classifies single segments
/// - `parser` turns a path string into segments
/// - `compile` builds the matcher and specificity score
/// - `generate` fills a pattern with parameters
pub mod compile;
pub mod generate;
pub mod parser;
pub mod pattern;

pub use compile::CompiledPattern;
pub use generate::generate_path;
pub use parser::{explode_optional_segments, parse_pattern, ParsedPattern};
pub use pattern::{classify_segment, render_segments, Segment, SPLAT_PARAM};
