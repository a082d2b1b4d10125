use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::key::Key;
use crate::value::Value;

/// The results of one memoized function, split by key tier.
#[derive(Default)]
pub struct Table {
    /// Calls with a single text argument.
    text: FxHashMap<Rc<str>, Entry>,
    /// Calls with only scalar arguments.
    scalars: FxHashMap<String, Entry>,
    /// All other calls, scanned linearly.
    general: Vec<(Vec<Value>, Entry)>,
}

/// A memoized result.
pub struct Entry {
    /// The memoized function's output.
    output: Value,
    /// How many evictions have passed since the entry has last been used.
    age: usize,
}

impl Table {
    /// Look for a matching entry, resetting its age.
    pub fn lookup(&mut self, key: &Key, args: &[Value]) -> Option<Value> {
        let entry = match key {
            Key::Text(text) => self.text.get_mut(text),
            Key::Scalars(encoded) => self.scalars.get_mut(encoded),
            Key::General => self
                .general
                .iter_mut()
                .find(|(seen, _)| identical(seen, args))
                .map(|(_, entry)| entry),
        }?;

        entry.age = 0;
        Some(entry.output.clone())
    }

    /// Insert an entry.
    ///
    /// A recursive call with the same arguments may have inserted a result
    /// in the meantime. The earlier result is kept.
    pub fn insert(&mut self, key: Key, args: Vec<Value>, output: Value) {
        let entry = Entry { output, age: 0 };
        match key {
            Key::Text(text) => {
                self.text.entry(text).or_insert(entry);
            }
            Key::Scalars(encoded) => {
                self.scalars.entry(encoded).or_insert(entry);
            }
            Key::General => {
                if !self.general.iter().any(|(seen, _)| identical(seen, &args)) {
                    self.general.push((args, entry));
                }
            }
        }
    }

    /// Age every entry by one and drop those older than `max_age`. Returns
    /// how many were dropped.
    pub fn evict(&mut self, max_age: usize) -> usize {
        let before = self.len();
        let keep = |entry: &mut Entry| {
            entry.age += 1;
            entry.age <= max_age
        };

        self.text.retain(|_, entry| keep(entry));
        self.scalars.retain(|_, entry| keep(entry));
        self.general.retain_mut(|(_, entry)| keep(entry));
        before - self.len()
    }

    /// The number of memoized results.
    pub fn len(&self) -> usize {
        self.text.len() + self.scalars.len() + self.general.len()
    }
}

/// Element-wise identity of two argument lists.
fn identical(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.identical(b))
}
