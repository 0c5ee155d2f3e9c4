//! JSON scripts driving a memento step by step.
//!
//! ```json
//! {
//!   "kind": "record",
//!   "config": { "ignore": ["updated_at"] },
//!   "initial": { "a": 1 },
//!   "steps": [
//!     { "op": "store" },
//!     { "op": "set", "attrs": { "a": 2, "b": 3 } },
//!     { "op": "restore" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use memento::{Memento, MementoConfig};
use memento_common::{Attributes, EntityKind, IgnoreList};
use memento_kernel::{Collection, Entity, Record};
use serde::Deserialize;
use std::path::Path;

/// One operation in a script.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Step {
    Store,
    Set { attrs: Attributes },
    Unset { key: String },
    Restore {
        #[serde(default)]
        ignore: Option<IgnoreList>,
    },
    Restart,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub kind: EntityKind,
    #[serde(default)]
    pub config: MementoConfig,
    #[serde(default)]
    pub initial: Attributes,
    pub steps: Vec<Step>,
}

/// Entity state after each step, plus the final stack depth.
#[derive(Debug, Default)]
pub struct Transcript {
    pub states: Vec<Attributes>,
    pub depth: usize,
}

impl Script {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
    }

    /// Build the entity described by the script and run every step on it.
    pub fn run(&self) -> Result<Transcript> {
        match self.kind {
            EntityKind::Record => {
                let mut record = Record::from_attributes(self.initial.clone());
                self.run_on(&mut record)
            }
            EntityKind::Collection => {
                let mut collection = Collection::new();
                collection.set(&self.initial)?;
                self.run_on(&mut collection)
            }
        }
    }

    fn run_on<E: Entity>(&self, entity: &mut E) -> Result<Transcript> {
        let mut memento = Memento::new(entity, self.config.clone());
        let mut transcript = Transcript::default();

        for (i, step) in self.steps.iter().enumerate() {
            tracing::debug!(step = i, ?step, "running step");
            match step {
                Step::Store => {
                    memento.store();
                }
                Step::Set { attrs } => memento.entity_mut().set(attrs)?,
                Step::Unset { key } => memento.entity_mut().unset(key)?,
                Step::Restore { ignore: None } => {
                    memento.restore()?;
                }
                Step::Restore {
                    ignore: Some(ignore),
                } => {
                    let config = MementoConfig {
                        ignore: ignore.clone(),
                    };
                    memento.restore_with(config)?;
                }
                Step::Restart => {
                    memento.restart()?;
                }
            }
            transcript.states.push(memento.entity().to_json());
        }

        transcript.depth = memento.depth();
        Ok(transcript)
    }
}
