//! Variable bindings for one run.
//!
//! A run owns a single flat [`Env`]. Function calls get a fresh one seeded
//! only with their parameters, so callers' locals are never visible inside a
//! call.

use std::collections::HashMap;

use crate::value::Value;

#[derive(Debug, Clone, Default)]
pub struct Env {
    vars: HashMap<String, Value>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Binds `name`, overwriting any previous value.
    pub fn set(&mut self, name: impl Into<String>, val: Value) {
        self.vars.insert(name.into(), val);
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.vars.remove(name)
    }

    /// Puts back a binding captured with `get(name).cloned()`: the old value
    /// if there was one, otherwise no binding at all.
    pub fn restore(&mut self, name: &str, saved: Option<Value>) {
        match saved {
            Some(v) => self.set(name, v),
            None => {
                self.remove(name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// All bindings, sorted by name.
    pub fn vars_snapshot(&self) -> Vec<(String, Value)> {
        let mut vars: Vec<(String, Value)> = self
            .vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        vars.sort_by(|a, b| a.0.cmp(&b.0));
        vars
    }
}
