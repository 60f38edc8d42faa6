//! Validators for the optional `scripts/` and `references/` directories

mod references;
mod scripts;

pub use references::{validate_references, REFERENCE_EXTENSIONS};
pub use scripts::{find_syntax_error, validate_scripts, ScriptLanguage, SCRIPT_EXTENSIONS};
