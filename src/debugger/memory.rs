use crate::parser::Value;
use indexmap::IndexMap;

/// A stored variable: its value and the source line that last wrote it.
/// Writes replace the whole entry; entries are never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Variable {
    pub value: Value,
    pub last_changed: usize,
}

/// The single global variable store shared by every frame. Iteration order
/// is insertion order of first write.
#[derive(Debug, Default)]
pub struct Memory {
    vars: IndexMap<String, Variable>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&mut self, name: &str, value: Value, line: usize) {
        self.vars.insert(
            name.to_string(),
            Variable {
                value,
                last_changed: line,
            },
        );
    }

    pub fn read(&self, name: &str) -> Option<Variable> {
        self.vars.get(name).copied()
    }

    pub fn remove(&mut self, name: &str) {
        self.vars.shift_remove(name);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(name, var)| (name.as_str(), var))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
