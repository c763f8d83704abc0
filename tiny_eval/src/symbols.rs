use std::collections::HashMap;

use log::debug;

use crate::types::Value;

/// Session-wide variables. There is no scoping and no deletion; a
/// name that was never written reads as `0`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SymbolTable {
    values: HashMap<String, Value>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: Value) {
        debug_assert!(!name.is_empty(), "symbol names cannot be empty");
        debug!("Set {name} -> {value:?}");
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Value {
        debug!("Get {name}");
        self.values
            .get(name)
            .cloned()
            .unwrap_or(Value::Number(0.0))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}
