//! Filename heuristic that pairs a library record with its context file.
//!
//! Library names come in several shapes: namespaced (`group/package`),
//! dotted (`astropy.io`) or ecosystem-prefixed (`python-skyfield`). The
//! candidates below go from the most specific spelling to the loosest one,
//! and the first candidate present on disk wins.

use crate::domain::model::ContextIndex;

pub const CONTEXT_EXTENSION: &str = ".txt";
pub const CONTEXT_SUFFIX: &str = "-context";

/// Substring after the last `/`, or the whole name when there is none.
pub fn package_name(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

fn last_dash_segment(package: &str) -> &str {
    package.rsplit('-').next().unwrap_or(package)
}

fn context_name(stem: &str) -> String {
    format!("{stem}{CONTEXT_SUFFIX}{CONTEXT_EXTENSION}")
}

fn plain_name(stem: &str) -> String {
    format!("{stem}{CONTEXT_EXTENSION}")
}

/// Candidate context file names for `name`, in precedence order.
pub fn candidate_file_names(name: &str) -> Vec<String> {
    let package = package_name(name);
    let short = last_dash_segment(package);

    vec![
        context_name(package),
        plain_name(package),
        context_name(&name.replace('/', "-").replace('.', "-")),
        context_name(&package.replace('.', "-")),
        context_name(short),
        plain_name(short),
    ]
}

/// Returns the first candidate for `name` that exists in `index`.
pub fn find_context_file(name: &str, index: &ContextIndex) -> Option<String> {
    candidate_file_names(name).into_iter().find(|candidate| {
        let hit = index.contains(candidate);
        tracing::debug!("{} -> {} ({})", name, candidate, if hit { "hit" } else { "miss" });
        hit
    })
}

pub fn is_context_file(file_name: &str) -> bool {
    file_name.ends_with(CONTEXT_EXTENSION)
}
