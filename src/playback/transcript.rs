//! Append-only record of revealed steps

use crate::script::{Step, StepKind};

/// Where a transcript entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Copied from the script
    Scripted,
    /// Synthesized from a viewer choice
    Reply,
}

/// A revealed step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub step: Step,
    pub origin: Origin,
}

impl Entry {
    pub fn is_user(&self) -> bool {
        self.step.kind.is_user_text()
    }

    #[cfg(test)]
    pub fn key(&self) -> (u32, Origin) {
        (self.step.id, self.origin)
    }
}

/// Ordered entries; grows monotonically and never reorders
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
    scripted: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scripted(&mut self, step: Step) {
        self.entries.push(Entry {
            step,
            origin: Origin::Scripted,
        });
        self.scripted += 1;
    }

    /// Append a viewer reply answering step `answering`
    pub fn push_reply(&mut self, answering: u32, text: impl Into<String>) {
        self.entries.push(Entry {
            step: Step::new(answering, StepKind::UserText { text: text.into() }),
            origin: Origin::Reply,
        });
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries copied from the script
    pub fn scripted_len(&self) -> usize {
        self.scripted
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }
}
