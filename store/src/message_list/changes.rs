/// A positional change to the entry list, for a renderer to apply as a diff.
///
/// Events are emitted synchronously, in the order the mutations happen, and
/// every index refers to the list as it was right before that event.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ListChange {
    /// `count` entries were inserted starting at `start`
    Inserted { start: usize, count: usize },
    /// `count` entries were removed starting at `start`
    Removed { start: usize, count: usize },
    /// The entry at `index` changed in place (selection state)
    Changed { index: usize },
}

/// Receives list changes as they happen.
///
/// Listeners must not call back into the store.
pub trait ChangeListener {
    fn on_change(&mut self, change: &ListChange);
}

impl<F> ChangeListener for F
where
    F: FnMut(&ListChange),
{
    fn on_change(&mut self, change: &ListChange) {
        self(change)
    }
}

/// Mirrors a list as a plain vector by replaying change events.
///
/// Renderers that keep their own row state can use this to check that they
/// applied a batch of changes in order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ChangeReplay {
    rows: usize,
    changed: Vec<usize>,
}

impl ChangeReplay {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            changed: Vec::new(),
        }
    }

    /// Applies a change; returns false when it does not fit the current rows.
    pub fn apply(&mut self, change: &ListChange) -> bool {
        match *change {
            ListChange::Inserted { start, count } => {
                if start > self.rows {
                    return false;
                }
                self.rows += count;
            }
            ListChange::Removed { start, count } => {
                if start.checked_add(count).is_none_or(|end| end > self.rows) {
                    return false;
                }
                self.rows -= count;
            }
            ListChange::Changed { index } => {
                if index >= self.rows {
                    return false;
                }
                self.changed.push(index);
            }
        }
        true
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Indices reported as changed in place, in emission order.
    pub fn changed(&self) -> &[usize] {
        &self.changed
    }
}
