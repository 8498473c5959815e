//! Node id generation.
//!
//! Ids are a pure function of the path: lowercase, every run of
//! non-alphanumeric characters collapsed to `_`, leading and trailing `_`
//! trimmed. Paths differing only in stripped characters collide; the
//! allocator resolves that with numeric suffixes in allocation order.

use std::collections::HashSet;

/// Id used when sanitizing leaves nothing
pub const FALLBACK_ID: &str = "node";

pub fn sanitize_id(path: &str) -> String {
    let mut id = String::with_capacity(path.len());
    let mut pending_separator = false;

    for c in path.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }

    if id.is_empty() {
        FALLBACK_ID.to_string()
    } else {
        id
    }
}

/// Id of the virtual node for a package dependency
pub fn external_id(package: &str) -> String {
    format!("external_{}", sanitize_id(package))
}

/// Hands out unique ids, suffixing collisions with `_2`, `_3`, ...
#[derive(Debug, Default)]
pub struct IdAllocator {
    used: HashSet<String>,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    pub fn allocate(&mut self, base: String, path: &str) -> String {
        if self.used.insert(base.clone()) {
            return base;
        }

        let unique = (2..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_else(|| base.clone());
        log::warn!(
            "Node id '{}' for {} collides with an existing node; using '{}'",
            base,
            path,
            unique
        );
        self.used.insert(unique.clone());
        unique
    }
}
