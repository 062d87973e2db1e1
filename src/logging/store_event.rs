use serde::{Deserialize, Serialize};
use tracing::warn;

/// Structured record of a single store access.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoreEvent {
    op: Op,
    collection: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

impl StoreEvent {
    pub fn read(collection: &str, doc: &str, error: Option<String>) -> Self {
        StoreEvent::new(
            Op::Read(ReadStats {
                read: 1,
                not_found: 0,
            }),
            collection,
            Some(doc),
            error,
        )
    }

    pub fn read_not_found(collection: &str, doc: &str) -> Self {
        StoreEvent::new(
            Op::Read(ReadStats {
                read: 1,
                not_found: 1,
            }),
            collection,
            Some(doc),
            None,
        )
    }

    pub fn scan(collection: &str, num: usize, error: Option<String>) -> Self {
        StoreEvent::new(
            Op::Read(ReadStats {
                read: num,
                not_found: 0,
            }),
            collection,
            None,
            error,
        )
    }

    pub fn create(collection: &str, doc: &str, error: Option<String>) -> Self {
        StoreEvent::new(Op::Create, collection, Some(doc), error)
    }

    pub fn write(collection: &str, doc: &str, error: Option<String>) -> Self {
        StoreEvent::new(Op::Write, collection, Some(doc), error)
    }

    pub fn delete(collection: &str, doc: &str, error: Option<String>) -> Self {
        StoreEvent::new(Op::Delete, collection, Some(doc), error)
    }

    pub fn encode(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                warn!("{}", e);
                String::default()
            }
        }
    }

    fn new(op: Op, collection: &str, doc: Option<&str>, error: Option<String>) -> Self {
        StoreEvent {
            op,
            collection: format!("/{collection}"),
            doc: doc.map(|doc| doc.to_owned()),
            errors: error.into_iter().collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
enum Op {
    Read(ReadStats),
    Create,
    Write,
    Delete,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
struct ReadStats {
    read: usize,

    #[serde(skip_serializing_if = "is_zero")]
    not_found: usize,
}

fn is_zero(num: &usize) -> bool {
    *num == 0
}
