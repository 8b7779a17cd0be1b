use super::error::ParseError;
use super::types::{Op, Program, Stmt, Template, Value, MAIN};

/// Body lines of a `def` block carry exactly this prefix.
const BODY_INDENT: &str = "    ";

/// What one source submission produced besides template table changes:
/// breakpoint lines requested via `add break <line>` (registered directly,
/// never stored as operations).
#[derive(Debug, Default)]
pub struct Ingest {
    pub breakpoints: Vec<usize>,
}

/// Parses submitted source text into the program's template table.
///
/// One statement per line, `<keyword> <operand(s)>` separated by a single
/// space. `def <name>` opens a template; the following four-space-indented
/// lines form its body, and the first line without that prefix closes it,
/// returning control to the enclosing template. Line indices are 0-based
/// within the submitted block.
pub struct ProgramBuilder<'a> {
    program: &'a mut Program,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(program: &'a mut Program) -> Self {
        Self { program }
    }

    pub fn ingest(mut self, source: &str) -> Result<Ingest, ParseError> {
        let mut ingest = Ingest::default();
        let mut enclosing: Vec<String> = Vec::new();
        let mut current = MAIN.to_string();

        for (line, raw) in source.lines().enumerate() {
            if raw.trim().is_empty() {
                continue;
            }
            if !raw.starts_with(BODY_INDENT) {
                if let Some(outer) = enclosing.pop() {
                    current = outer;
                }
            }
            let text = raw.trim();
            let (keyword, rest) = split_operand(text, line)?;
            match keyword {
                "def" => {
                    if self.program.contains(rest) {
                        return Err(ParseError::DuplicateFunction {
                            name: rest.to_string(),
                            line,
                        });
                    }
                    enclosing.push(std::mem::replace(&mut current, rest.to_string()));
                    self.program.insert(Template {
                        name: rest.to_string(),
                        body: Vec::new(),
                        defined_at: line,
                    });
                }
                "set" => {
                    let (name, value) = name_and_int(rest, line)?;
                    self.push(&current, Op::Set { name, value }, line);
                }
                "sub" => {
                    let (name, value) = name_and_int(rest, line)?;
                    self.push(&current, Op::Sub { name, value }, line);
                }
                "rem" => self.push(
                    &current,
                    Op::Rem {
                        name: rest.to_string(),
                    },
                    line,
                ),
                "print" => self.push(
                    &current,
                    Op::Print {
                        name: rest.to_string(),
                    },
                    line,
                ),
                "call" => self.push(
                    &current,
                    Op::Call {
                        target: rest.to_string(),
                    },
                    line,
                ),
                "add" => {
                    let (marker, number) = split_operand(rest, line)?;
                    if marker != "break" {
                        return Err(ParseError::UnknownKeyword {
                            keyword: format!("{keyword} {marker}"),
                            line,
                        });
                    }
                    ingest.breakpoints.push(parse_index(number, line)?);
                }
                other => {
                    return Err(ParseError::UnknownKeyword {
                        keyword: other.to_string(),
                        line,
                    });
                }
            }
        }

        Ok(ingest)
    }

    fn push(&mut self, template: &str, op: Op, line: usize) {
        // `template` was either inserted by a `def` above or is the root,
        // so the lookup cannot miss.
        if let Some(t) = self.program.template_mut(template) {
            t.body.push(Stmt { op, line });
        }
    }
}

fn split_operand(text: &str, line: usize) -> Result<(&str, &str), ParseError> {
    text.split_once(' ').ok_or_else(|| ParseError::MissingOperand {
        keyword: text.to_string(),
        line,
    })
}

fn name_and_int(rest: &str, line: usize) -> Result<(String, Value), ParseError> {
    let (name, number) = split_operand(rest, line)?;
    let value = number
        .trim()
        .parse()
        .map_err(|_| ParseError::InvalidInteger {
            token: number.to_string(),
            line,
        })?;
    Ok((name.to_string(), value))
}

fn parse_index(token: &str, line: usize) -> Result<usize, ParseError> {
    token.trim().parse().map_err(|_| ParseError::InvalidInteger {
        token: token.to_string(),
        line,
    })
}
