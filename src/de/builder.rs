//! The byte-at-a-time state machine behind [`Decoder`](crate::Decoder).
//!
//! [`EntryBuilder`] owns every piece of decoding state, so input can be
//! pushed in pieces of any size: a token, an escape or a line may be split
//! across calls to [`EntryBuilder::feed`] without changing the result.
//!
//! ```rust
//! use keyval::{EntryBuilder, EndOfStream, Entry};
//!
//! let mut builder = EntryBuilder::new();
//! builder.feed(b"[server]\nport = 80");
//! builder.feed(b"80\nhost = a\\");
//! builder.feed(b"#b\n");
//!
//! assert_eq!(builder.pop(), Some(Entry::new(["server", "port"], "8080")));
//! assert_eq!(builder.pop(), Some(Entry::new(["server", "host"], "a#b")));
//! assert_eq!(builder.finish(), EndOfStream::Clean);
//! assert_eq!(builder.pop(), None);
//! ```

use std::collections::VecDeque;
use std::mem;

use tracing::trace;

use crate::chars::{classify, Role, NEWLINE};
use crate::de::EndOfStream;
use crate::escape::EscapeTracker;
use crate::Entry;

/// Where the decoder is within the current line.
///
/// The `*Lead` states skip whitespace before the first byte of a token;
/// their content counterparts buffer whitespace and only keep it when more
/// content of the same token follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Initial,
    CommentLead,
    Comment,
    SectionLead,
    Section,
    KeyLead,
    Key,
    ValueLead,
    Value,
}

impl State {
    fn in_section(self) -> bool {
        matches!(self, State::SectionLead | State::Section)
    }

    fn in_value(self) -> bool {
        matches!(self, State::ValueLead | State::Value)
    }
}

/// Line and column of the next byte, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, col: 1 }
    }
}

/// Folds bytes into a queue of completed [`Entry`] records.
///
/// The active comment and section are kept apart from the record being
/// built. Each carries an `applied` flag that is cleared when a new comment
/// block or section header is read and set again once some record has been
/// emitted with it. A section header replaced by another one, or either
/// header reaching the end of input, while still unapplied is surfaced as a
/// record of its own. A comment block replaced by another is dropped.
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    state: State,
    escape: EscapeTracker,
    position: Position,

    comment: Vec<u8>,
    comment_applied: bool,
    comment_continues: bool,

    section: Vec<Vec<u8>>,
    section_part: Vec<u8>,
    section_applied: bool,

    key: Vec<Vec<u8>>,
    key_part: Vec<u8>,
    val: Vec<u8>,
    whitespace: Vec<u8>,

    queue: VecDeque<Entry>,
}

impl Default for EntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryBuilder {
    pub fn new() -> Self {
        EntryBuilder {
            state: State::Initial,
            escape: EscapeTracker::new(),
            position: Position::default(),
            comment: Vec::new(),
            comment_applied: true,
            comment_continues: false,
            section: Vec::new(),
            section_part: Vec::new(),
            section_applied: true,
            key: Vec::new(),
            key_part: Vec::new(),
            val: Vec::new(),
            whitespace: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Processes a chunk of input. Completed records are queued for
    /// [`EntryBuilder::pop`].
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.push(b);
        }
    }

    /// Processes a single byte.
    pub fn push(&mut self, b: u8) {
        self.advance(b);

        if !self.escape.feed(b) {
            return;
        }
        let role = if self.escape.is_active() {
            Role::Plain
        } else {
            classify(b)
        };

        let next = self.transition(role, b);
        if next != self.state {
            self.whitespace.clear();
            self.state = next;
        }
    }

    /// Takes the oldest completed record.
    pub fn pop(&mut self) -> Option<Entry> {
        self.queue.pop_front()
    }

    /// Number of completed records waiting in the queue.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Position of the next byte.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Signals the end of input.
    ///
    /// Any record still under construction is completed and queued. The
    /// result is [`EndOfStream::Incomplete`] when the input stopped inside a
    /// section header or right after a backslash. Calling it again queues
    /// nothing new and returns the same classification.
    pub fn finish(&mut self) -> EndOfStream {
        let end = if self.state.in_section() || self.escape.is_pending() {
            EndOfStream::Incomplete
        } else {
            EndOfStream::Clean
        };

        if self.has_pending_entry() {
            self.complete_key_part();
            self.complete_entry();
        }

        if !self.state.in_section() {
            self.state = State::Initial;
        }
        self.whitespace.clear();

        end
    }

    /// What an incomplete input was missing, if it stopped mid-token.
    #[must_use]
    pub fn expecting(&self) -> Option<&'static str> {
        if self.escape.is_pending() {
            Some("escaped character after '\\'")
        } else if self.state.in_section() {
            Some("closing ']' of section header")
        } else {
            None
        }
    }

    fn advance(&mut self, b: u8) {
        if b == NEWLINE {
            self.position.line += 1;
            self.position.col = 1;
        } else {
            self.position.col += 1;
        }
    }

    fn transition(&mut self, role: Role, b: u8) -> State {
        match self.state {
            State::Initial => self.initial(role, b),

            State::CommentLead => match role {
                r if r.is_whitespace() => State::CommentLead,
                Role::Newline => self.end_comment_line(),
                _ => {
                    self.comment.push(b);
                    State::Comment
                }
            },
            State::Comment => match role {
                r if r.is_whitespace() => {
                    self.whitespace.push(b);
                    State::Comment
                }
                Role::Newline => self.end_comment_line(),
                _ => {
                    self.comment.append(&mut self.whitespace);
                    self.comment.push(b);
                    State::Comment
                }
            },

            State::SectionLead => match role {
                r if r.is_whitespace() || r == Role::KeySeparator => State::SectionLead,
                Role::SectionClose | Role::Newline => State::Initial,
                _ => {
                    self.section_part.push(b);
                    State::Section
                }
            },
            State::Section => match role {
                r if r.is_whitespace() => {
                    self.whitespace.push(b);
                    State::Section
                }
                Role::KeySeparator => {
                    self.complete_section_part();
                    State::SectionLead
                }
                Role::SectionClose | Role::Newline => {
                    self.complete_section_part();
                    State::Initial
                }
                _ => {
                    self.section_part.append(&mut self.whitespace);
                    self.section_part.push(b);
                    State::Section
                }
            },

            State::KeyLead => match role {
                r if r.is_whitespace() || r == Role::KeySeparator => State::KeyLead,
                Role::ValueStart => State::ValueLead,
                Role::Newline => {
                    if !self.key.is_empty() {
                        self.complete_entry();
                    }
                    State::Initial
                }
                _ => {
                    self.key_part.push(b);
                    State::Key
                }
            },
            State::Key => match role {
                r if r.is_whitespace() => {
                    self.whitespace.push(b);
                    State::Key
                }
                Role::KeySeparator => {
                    self.complete_key_part();
                    State::KeyLead
                }
                Role::ValueStart => {
                    self.complete_key_part();
                    State::ValueLead
                }
                Role::Newline => {
                    self.complete_key_part();
                    self.complete_entry();
                    State::Initial
                }
                _ => {
                    self.key_part.append(&mut self.whitespace);
                    self.key_part.push(b);
                    State::Key
                }
            },

            State::ValueLead => match role {
                r if r.is_whitespace() => State::ValueLead,
                Role::Newline => {
                    self.complete_entry();
                    State::Initial
                }
                _ => {
                    self.val.push(b);
                    State::Value
                }
            },
            State::Value => match role {
                r if r.is_whitespace() => {
                    self.whitespace.push(b);
                    State::Value
                }
                Role::Newline => {
                    self.complete_entry();
                    State::Initial
                }
                _ => {
                    self.val.append(&mut self.whitespace);
                    self.val.push(b);
                    State::Value
                }
            },
        }
    }

    fn initial(&mut self, role: Role, b: u8) -> State {
        match role {
            r if r.is_whitespace() => State::Initial,
            Role::Newline => {
                self.comment_continues = false;
                State::Initial
            }
            Role::CommentStart => {
                self.begin_comment_line();
                State::CommentLead
            }
            Role::SectionOpen => {
                self.comment_continues = false;
                self.open_section();
                State::SectionLead
            }
            Role::KeySeparator => {
                self.comment_continues = false;
                State::KeyLead
            }
            Role::ValueStart => {
                self.comment_continues = false;
                State::ValueLead
            }
            _ => {
                self.comment_continues = false;
                self.key_part.push(b);
                State::Key
            }
        }
    }

    fn begin_comment_line(&mut self) {
        if self.comment_continues {
            self.comment.push(NEWLINE);
        } else {
            self.comment.clear();
        }
        self.comment_applied = false;
    }

    fn end_comment_line(&mut self) -> State {
        self.comment_continues = true;
        State::Initial
    }

    fn open_section(&mut self) {
        if self.has_unapplied_section() {
            self.complete_entry();
        }
        self.section.clear();
        self.section_applied = false;
    }

    fn complete_section_part(&mut self) {
        if !self.section_part.is_empty() {
            self.section.push(mem::take(&mut self.section_part));
        }
    }

    fn complete_key_part(&mut self) {
        if !self.key_part.is_empty() {
            self.key.push(mem::take(&mut self.key_part));
        }
    }

    fn has_unapplied_comment(&self) -> bool {
        !self.comment_applied && !self.comment.is_empty()
    }

    fn has_unapplied_section(&self) -> bool {
        !self.section_applied && !self.section.is_empty()
    }

    fn has_pending_entry(&self) -> bool {
        !self.key_part.is_empty()
            || !self.key.is_empty()
            || !self.val.is_empty()
            || self.state.in_value()
            || self.has_unapplied_comment()
            || self.has_unapplied_section()
    }

    fn complete_entry(&mut self) {
        let key = self
            .section
            .iter()
            .chain(self.key.iter())
            .map(|part| text(part))
            .collect();
        self.key.clear();

        let entry = Entry {
            key,
            val: text(&mem::take(&mut self.val)),
            comment: text(&self.comment),
        };
        trace!(
            line = self.position.line,
            key = %entry.path(),
            "completed entry"
        );

        self.queue.push_back(entry);
        self.comment_applied = true;
        self.section_applied = true;
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
