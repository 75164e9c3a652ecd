//! Search, formatting and URL resolution on top of the registry.

mod format;
mod search;
mod url;

pub use format::{format_candidate, short_file_name};
pub use search::{strip_docset_prefix, SearchContext, SearchEngine, SearchOutcome};
pub use url::{clean_path, resolve_url};
