use crate::viz::Entry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortAlgorithm {
    #[default]
    Bubble,
    Insertion,
}

impl SortAlgorithm {
    pub fn label(self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => "Bubble Sort",
            SortAlgorithm::Insertion => "Insertion Sort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn label(self) -> &'static str {
        match self {
            SortDirection::Ascending => "Ascending",
            SortDirection::Descending => "Descending",
        }
    }

    /// True when `left` must move to the right of `right`.
    fn out_of_order(self, left: u32, right: u32) -> bool {
        match self {
            SortDirection::Ascending => left > right,
            SortDirection::Descending => left < right,
        }
    }
}

/// Indices touched by the last step. `landed` is where the moved entry now
/// sits, `source` is where it was picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub landed: usize,
    pub source: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Bubble { pass: usize, j: usize },
    Insertion { i: usize },
    Done,
}

/// A sort suspended between units of visible work.
///
/// Each call to [`SortRun::advance`] performs one swap (bubble) or one full
/// insertion (insertion) on the slice it is handed and reports the touched
/// indices. `None` means the run is exhausted. The slice must keep the length
/// given to [`SortRun::new`] for the whole run.
#[derive(Debug, Clone)]
pub struct SortRun {
    algorithm: SortAlgorithm,
    direction: SortDirection,
    len: usize,
    cursor: Cursor,
    steps: usize,
    comparisons: usize,
}

impl SortRun {
    pub fn new(algorithm: SortAlgorithm, direction: SortDirection, len: usize) -> Self {
        let cursor = if len < 2 {
            Cursor::Done
        } else {
            match algorithm {
                SortAlgorithm::Bubble => Cursor::Bubble { pass: 0, j: 0 },
                SortAlgorithm::Insertion => Cursor::Insertion { i: 1 },
            }
        };
        Self {
            algorithm,
            direction,
            len,
            cursor,
            steps: 0,
            comparisons: 0,
        }
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    pub fn is_finished(&self) -> bool {
        self.cursor == Cursor::Done
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn advance(&mut self, entries: &mut [Entry]) -> Option<Highlight> {
        if entries.len() != self.len {
            self.cursor = Cursor::Done;
            return None;
        }
        let step = match self.cursor {
            Cursor::Bubble { .. } => self.bubble_step(entries),
            Cursor::Insertion { .. } => self.insertion_step(entries),
            Cursor::Done => None,
        };
        if step.is_some() {
            self.steps += 1;
        }
        step
    }

    fn bubble_step(&mut self, entries: &mut [Entry]) -> Option<Highlight> {
        let n = self.len;
        while let Cursor::Bubble { pass, j } = self.cursor {
            if pass >= n - 1 {
                self.cursor = Cursor::Done;
                break;
            }
            if j >= n - 1 - pass {
                self.cursor = Cursor::Bubble { pass: pass + 1, j: 0 };
                continue;
            }
            self.cursor = Cursor::Bubble { pass, j: j + 1 };
            self.comparisons += 1;
            if self
                .direction
                .out_of_order(entries[j].goals, entries[j + 1].goals)
            {
                entries.swap(j, j + 1);
                return Some(Highlight {
                    landed: j,
                    source: j + 1,
                });
            }
        }
        None
    }

    fn insertion_step(&mut self, entries: &mut [Entry]) -> Option<Highlight> {
        let Cursor::Insertion { i } = self.cursor else {
            return None;
        };
        if i >= self.len {
            self.cursor = Cursor::Done;
            return None;
        }

        let mut j = i;
        while j > 0 {
            self.comparisons += 1;
            if !self
                .direction
                .out_of_order(entries[j - 1].goals, entries[i].goals)
            {
                break;
            }
            j -= 1;
        }
        entries[j..=i].rotate_right(1);

        self.cursor = if i + 1 < self.len {
            Cursor::Insertion { i: i + 1 }
        } else {
            Cursor::Done
        };
        Some(Highlight {
            landed: j,
            source: i,
        })
    }
}

/// Runs a sort to completion and returns the number of steps taken.
pub fn run_to_end(
    algorithm: SortAlgorithm,
    direction: SortDirection,
    entries: &mut [Entry],
) -> usize {
    let mut run = SortRun::new(algorithm, direction, entries.len());
    while run.advance(entries).is_some() {}
    run.steps()
}
