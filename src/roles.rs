use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Split a functional assignment into its individual roles.
///
/// Comment text starting at ` #` or ` !` is dropped, then the remainder
/// is split on the standard separators: ` / ` between the parts of a
/// multifunctional protein, ` @ ` between ambiguous alternatives, and
/// `; ` between loosely joined roles.
pub fn roles_of_function(function: &str) -> Vec<String> {
    let mut text = function;
    for marker in [" #", " !"] {
        if let Some(pos) = text.find(marker) {
            text = &text[..pos];
        }
    }
    text.split(" / ")
        .flat_map(|part| part.split(" @ "))
        .flat_map(|part| part.split("; "))
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized form of a role name used for matching: lowercased,
/// whitespace collapsed, EC/TC designations removed.
pub fn normalize(role: &str) -> String {
    let mut text = role.to_lowercase();
    for tag in ["(ec ", "(tc "] {
        while let Some(start) = text.find(tag) {
            match text[start..].find(')') {
                Some(end) => text.replace_range(start..start + end + 1, ""),
                None => text.truncate(start),
            }
        }
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Registry of target roles, keyed by ID and matchable by name.
#[derive(Default)]
pub struct RoleMap {
    /// normalized name -> role ID
    by_name: HashMap<String, String>,
    /// role ID -> display name
    names: HashMap<String, String>,
    /// IDs in insertion order, for deterministic output
    order: Vec<String>,
    next_id: usize,
}

impl RoleMap {
    pub fn new() -> Self {
        RoleMap::default()
    }

    /// Add a role with an explicit ID. A later entry with the same
    /// normalized name wins the name lookup.
    pub fn put(&mut self, id: &str, name: &str) {
        if !self.names.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.names.insert(id.to_string(), name.to_string());
        self.by_name.insert(normalize(name), id.to_string());
    }

    /// Add a role by name alone, synthesizing an ID. Re-registering an
    /// existing name returns its current ID.
    pub fn register(&mut self, name: &str) -> String {
        if let Some(id) = self.by_name.get(&normalize(name)) {
            return id.clone();
        }
        self.next_id += 1;
        let id = format!("Role{}", self.next_id);
        self.put(&id, name);
        id
    }

    /// ID of the role matching a name, if it is one of ours.
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(&normalize(name)).map(String::as_str)
    }

    /// Display name for a role ID.
    pub fn name_of(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Role IDs in the order they were added.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Load a role map from a headerless tab-delimited file with the
    /// role ID in the first column and the role name in the last. The
    /// conventional middle column is ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("cannot open role file {}", path.display()))?;
        let mut map = RoleMap::new();
        for (line_no, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| format!("cannot read role file {}", path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.trim_end().split('\t').collect();
            if fields.len() < 2 {
                bail!(
                    "role file {} line {}: expected at least 2 columns",
                    path.display(),
                    line_no + 1
                );
            }
            map.put(fields[0], fields[fields.len() - 1]);
        }
        Ok(map)
    }
}
