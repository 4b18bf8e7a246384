//! Append-only message history that snapshots can share.

use std::{fmt, mem, rc::Rc};

use serde::{Serialize, Serializer};

use super::entity::Message;

/// Messages per sealed chunk
const CHUNK_LEN: usize = 64;

struct Chunk {
    /// Position of the chunk's first message in the whole history
    start: usize,
    messages: Box<[Rc<Message>]>,
    previous: Option<Rc<Chunk>>,
}

/// Message history in insertion order.
///
/// Full chunks are sealed behind `Rc` and never touched again, so every clone
/// of the log points at the same chunks. Only the open tail is copied on
/// clone, and it holds at most `CHUNK_LEN - 1` `Rc<Message>` handles. Both
/// `push` and `clone` therefore cost the same however long the history is.
#[derive(Clone)]
pub struct MessageLog {
    sealed: Option<Rc<Chunk>>,
    sealed_len: usize,
    tail: Vec<Rc<Message>>,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self {
            sealed: None,
            sealed_len: 0,
            tail: Vec::with_capacity(CHUNK_LEN),
        }
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sealed_len + self.tail.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a message
    pub fn push(&mut self, message: Message) {
        self.tail.push(Rc::new(message));
        if self.tail.len() == CHUNK_LEN {
            let messages =
                mem::replace(&mut self.tail, Vec::with_capacity(CHUNK_LEN)).into_boxed_slice();
            self.sealed = Some(Rc::new(Chunk {
                start: self.sealed_len,
                messages,
                previous: self.sealed.take(),
            }));
            self.sealed_len += CHUNK_LEN;
        }
    }

    pub fn last(&self) -> Option<&Message> {
        match self.tail.last() {
            Some(message) => Some(&**message),
            None => self
                .sealed
                .as_deref()
                .and_then(|chunk| chunk.messages.last())
                .map(|message| &**message),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        if index >= self.sealed_len {
            return self
                .tail
                .get(index - self.sealed_len)
                .map(|message| &**message);
        }
        let mut chunk = self.sealed.as_deref();
        while let Some(current) = chunk {
            if index >= current.start {
                return current
                    .messages
                    .get(index - current.start)
                    .map(|message| &**message);
            }
            chunk = current.previous.as_deref();
        }
        None
    }

    /// All messages, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Message> + '_ {
        self.iter_from(0)
    }

    /// Messages from position `start` on, oldest first.
    ///
    /// Only the chunks holding those messages are visited, so reading the few
    /// newest messages of a long history is cheap.
    pub fn iter_from(&self, start: usize) -> impl Iterator<Item = &Message> + '_ {
        let mut sealed: Vec<&Chunk> = Vec::new();
        if start < self.sealed_len {
            let mut chunk = self.sealed.as_deref();
            while let Some(current) = chunk {
                sealed.push(current);
                if current.start <= start {
                    break;
                }
                chunk = current.previous.as_deref();
            }
        }

        let first_start = sealed.last().map_or(self.sealed_len, |chunk| chunk.start);
        let skip = start.saturating_sub(first_start);

        let mut slices: Vec<&[Rc<Message>]> = sealed
            .into_iter()
            .rev()
            .map(|chunk| &chunk.messages[..])
            .collect();
        slices.push(self.tail.as_slice());

        slices
            .into_iter()
            .flatten()
            .skip(skip)
            .map(|message| &**message)
    }
}

impl FromIterator<Message> for MessageLog {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        let mut log = Self::new();
        for message in iter {
            log.push(message);
        }
        log
    }
}

impl PartialEq for MessageLog {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for MessageLog {}

impl fmt::Debug for MessageLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Serialize for MessageLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
