use std::collections::HashMap;

/// Name of the implicit root template every program starts from.
pub const MAIN: &str = "main";

pub type Value = i64;

/// One statement variant with its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Set { name: String, value: Value },
    Sub { name: String, value: Value },
    Rem { name: String },
    Print { name: String },
    Call { target: String },
}

/// An operation tagged with the 0-based index of the line it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
    pub op: Op,
    pub line: usize,
}

/// The parsed body of one function (or the root program). Immutable once the
/// submission that defined it has been ingested.
#[derive(Debug, Clone)]
pub struct Template {
    pub name: String,
    pub body: Vec<Stmt>,
    pub defined_at: usize,
}

/// Name-keyed table of templates. The root template is always present.
#[derive(Debug)]
pub struct Program {
    templates: HashMap<String, Template>,
}

impl Program {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(
            MAIN.to_string(),
            Template {
                name: MAIN.to_string(),
                body: Vec::new(),
                defined_at: 0,
            },
        );
        Self { templates }
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub(crate) fn insert(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }

    pub(crate) fn template_mut(&mut self, name: &str) -> Option<&mut Template> {
        self.templates.get_mut(name)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
