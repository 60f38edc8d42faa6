//! Checks for helper scripts under `scripts/`
//!
//! Scripts are parsed with tree-sitter grammars. A tree containing an
//! error or missing node is reported at the position of the first such
//! node in document order.

use crate::config::Limits;
use crate::outcome::{CheckCategory, CheckOutcome};
use crate::package::{file_label, Package, SCRIPTS_DIR};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use tree_sitter::{Node, Parser};

/// Extensions recognized as executable scripts
pub const SCRIPT_EXTENSIONS: [&str; 3] = ["py", "sh", "bash"];

/// Scripting languages with a bundled grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptLanguage {
    Python,
    Bash,
}

impl ScriptLanguage {
    /// Detect the language from the file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "py" => Some(ScriptLanguage::Python),
            "sh" | "bash" => Some(ScriptLanguage::Bash),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScriptLanguage::Python => "Python",
            ScriptLanguage::Bash => "Bash",
        }
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            ScriptLanguage::Python => tree_sitter_python::LANGUAGE.into(),
            ScriptLanguage::Bash => tree_sitter_bash::LANGUAGE.into(),
        }
    }

    /// What the documentation block is called for this language
    fn doc_label(&self) -> &'static str {
        match self {
            ScriptLanguage::Python => "docstring",
            ScriptLanguage::Bash => "header comment",
        }
    }

    /// Whether `head` contains a documentation block
    fn has_doc_block(&self, head: &str) -> bool {
        match self {
            ScriptLanguage::Python => head.contains("\"\"\"") || head.contains("'''"),
            ScriptLanguage::Bash => head
                .lines()
                .map(str::trim_start)
                .any(|line| line.starts_with('#') && !line.starts_with("#!")),
        }
    }
}

/// Parse `source` and describe the first syntax error, if any
pub fn find_syntax_error(language: ScriptLanguage, source: &str) -> Option<String> {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&language.grammar()) {
        return Some(format!("{} grammar unavailable: {}", language.name(), e));
    }

    let Some(tree) = parser.parse(source, None) else {
        return Some(format!("{} parser produced no tree", language.name()));
    };

    first_problem(language, tree.root_node()).map(|(node, detail)| {
        let position = node.start_position();
        format!(
            "line {}, column {}: {}",
            position.row + 1,
            position.column + 1,
            detail
        )
    })
}

/// What is wrong with this node on its own, if anything
fn node_problem(language: ScriptLanguage, node: Node<'_>) -> Option<String> {
    if node.is_missing() {
        return Some(format!("missing '{}'", node.kind()));
    }
    if node.is_error() {
        return Some("invalid syntax".to_string());
    }
    // the grammar still accepts Python 2 statement forms
    match (language, node.kind()) {
        (ScriptLanguage::Python, "print_statement") => {
            Some("missing parentheses in call to 'print'".to_string())
        }
        (ScriptLanguage::Python, "exec_statement") => {
            Some("missing parentheses in call to 'exec'".to_string())
        }
        _ => None,
    }
}

/// Pre-order walk with a cursor so nesting depth never grows the call stack
fn first_problem(language: ScriptLanguage, root: Node<'_>) -> Option<(Node<'_>, String)> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if let Some(detail) = node_problem(language, node) {
            return Some((node, detail));
        }

        // error-free Bash subtrees have nothing left to report
        let descend = node.has_error() || language == ScriptLanguage::Python;
        if descend && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Validate every script directly inside `scripts/`
pub fn validate_scripts(package: &Package, limits: &Limits) -> Vec<CheckOutcome> {
    let mut outcomes = Vec::new();

    for path in package.files_in(SCRIPTS_DIR, &SCRIPT_EXTENSIONS) {
        let Some(language) = ScriptLanguage::from_path(&path) else {
            continue;
        };
        let name = file_label(&path);
        debug!("Checking {} script {}", language.name(), name);

        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(e) => {
                warn!("Cannot read script {}: {}", path.display(), e);
                outcomes.push(CheckOutcome::error(
                    CheckCategory::Syntax,
                    format!("Cannot read script {}: {}", name, e),
                ));
                continue;
            }
        };

        if !source.starts_with("#!") {
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Syntax,
                format!("Script missing shebang: {}", name),
            ));
        }

        let head: String = source.chars().take(limits.doc_window_chars).collect();
        if !language.has_doc_block(&head) {
            outcomes.push(CheckOutcome::warning(
                CheckCategory::Syntax,
                format!("Script missing {}: {}", language.doc_label(), name),
            ));
        }

        match find_syntax_error(language, &source) {
            None => outcomes.push(CheckOutcome::pass(
                CheckCategory::Syntax,
                format!("Valid {} syntax: {}", language.name(), name),
            )),
            Some(error) => outcomes.push(CheckOutcome::error(
                CheckCategory::Syntax,
                format!("Syntax error in {}: {}", name, error),
            )),
        }
    }

    outcomes
}
