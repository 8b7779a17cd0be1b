use std::collections::HashSet;

/// Source lines `run()` must pause at, plus a one-slot memory of the line
/// most recently paused at so that resuming does not immediately re-trigger
/// the same statement.
#[derive(Debug, Default)]
pub struct Breakpoints {
    points: HashSet<usize>,
    last_break: Option<usize>,
}

impl Breakpoints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: usize) {
        self.points.insert(line);
    }

    pub fn remove(&mut self, line: usize) {
        self.points.remove(&line);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn contains(&self, line: usize) -> bool {
        self.points.contains(&line)
    }

    /// True when execution arriving at `line` should pause.
    pub fn should_pause(&self, line: usize) -> bool {
        self.points.contains(&line) && self.last_break != Some(line)
    }

    pub fn note_pause(&mut self, line: usize) {
        self.last_break = Some(line);
    }

    pub fn clear_pause(&mut self) {
        self.last_break = None;
    }
}
