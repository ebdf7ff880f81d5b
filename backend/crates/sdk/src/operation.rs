use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::State;

/// One source row, passed through to the destination untouched.
pub type Record = Map<String, Value>;

/// A change handed to the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Upsert { table: String, data: Record },
    Checkpoint { state: State },
}

impl Operation {
    pub fn upsert(table: impl Into<String>, data: Record) -> Self {
        Self::Upsert {
            table: table.into(),
            data,
        }
    }

    pub fn checkpoint(state: State) -> Self {
        Self::Checkpoint { state }
    }

    pub fn is_checkpoint(&self) -> bool {
        matches!(self, Self::Checkpoint { .. })
    }
}
