use crate::{Error, Result};
use rustc_hash::FxHashSet;
use std::fmt;

/// The independent id namespaces. The same id may appear once in each of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdNamespace {
    Node,
    Port,
    Edge,
    Label,
    Section,
}

impl IdNamespace {
    pub fn as_str(self) -> &'static str {
        match self {
            IdNamespace::Node => "node",
            IdNamespace::Port => "port",
            IdNamespace::Edge => "edge",
            IdNamespace::Label => "label",
            IdNamespace::Section => "section",
        }
    }
}

impl fmt::Display for IdNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-transform record of every id seen so far, one set per namespace.
#[derive(Debug, Default)]
pub(crate) struct IdRegistry {
    seen: [FxHashSet<String>; 5],
}

impl IdRegistry {
    pub(crate) fn remember<'a>(
        &mut self,
        namespace: IdNamespace,
        id: Option<&'a str>,
    ) -> Result<&'a str> {
        let Some(id) = id else {
            return Err(Error::MissingId { namespace });
        };
        if !self.seen[namespace as usize].insert(id.to_string()) {
            return Err(Error::DuplicateId {
                id: id.to_string(),
                namespace,
            });
        }
        Ok(id)
    }
}
