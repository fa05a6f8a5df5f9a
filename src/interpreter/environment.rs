//! Runtime environment for the tree-walking interpreter.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::eval::{Bindings, Value};

/// A record of named fields, in declaration order.
pub type Record = IndexMap<String, Value>;

/// One flat scope: every statement at every depth sees the same bindings.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    data: IndexMap<String, Record>,
    entities: IndexMap<String, Record>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous value.
    pub fn define(&mut self, name: String, value: Value) {
        self.values.insert(name, value);
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    /// Store a data record, replacing one with the same name.
    pub fn define_data(&mut self, name: String, record: Record) {
        self.data.insert(name, record);
    }

    pub fn data(&self, name: &str) -> Option<&Record> {
        self.data.get(name)
    }

    /// Register an entity with an empty record.
    pub fn define_entity(&mut self, name: String) {
        self.entities.insert(name, Record::new());
    }

    pub fn entity(&self, name: &str) -> Option<&Record> {
        self.entities.get(name)
    }
}

impl Bindings for Environment {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name)
    }

    fn lookup_field(&self, record: &str, field: &str) -> Option<Value> {
        self.data.get(record)?.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_overwrites() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Int(1));
        env.define("x".to_string(), Value::String("two".to_string()));
        assert_eq!(env.get("x"), Some(Value::String("two".to_string())));
    }

    #[test]
    fn test_records_are_separate_from_variables() {
        let mut env = Environment::new();
        let mut record = Record::new();
        record.insert("hp".to_string(), Value::Int(10));
        env.define_data("player".to_string(), record);

        assert_eq!(env.lookup("player"), None);
        assert_eq!(env.lookup_field("player", "hp"), Some(Value::Int(10)));
        assert_eq!(env.lookup_field("player", "mp"), None);
        assert_eq!(env.lookup_field("enemy", "hp"), None);
    }

    #[test]
    fn test_entities_start_empty() {
        let mut env = Environment::new();
        env.define_entity("hero".to_string());
        assert!(env.entity("hero").is_some_and(|record| record.is_empty()));
        assert!(env.entity("villain").is_none());
    }
}
