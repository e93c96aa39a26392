//! Persistence boundary for the board.
//!
//! The board is stored as a single JSON document under a fixed file name.
//! `Storage` abstracts the durable medium so the store can be exercised
//! against an in-memory backend in tests; `JsonFileStorage` is the real
//! file-backed implementation. Absent or unparsable data is never fatal,
//! it simply reads as "no data" and lets the store seed itself.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::task::Task;

/// File name of the board inside the kanban directory.
pub const BOARD_FILE: &str = "tasks.json";

/// A durable text slot holding the serialized board.
pub trait Storage {
    /// Read the stored payload, `None` if nothing has been written yet
    /// or the medium cannot be read.
    fn read(&self) -> Option<String>;

    /// Overwrite the stored payload with the full serialized board.
    fn write(&mut self, payload: &str) -> io::Result<()>;
}

/// Serialize the task sequence for storage.
pub fn encode(tasks: &[Task]) -> String {
    serde_json::to_string_pretty(tasks).unwrap()
}

/// Parse a stored payload back into the task sequence. A malformed
/// payload reads as "no data" rather than an error.
pub fn decode(payload: &str) -> Option<Vec<Task>> {
    match serde_json::from_str(payload) {
        Ok(tasks) => Some(tasks),
        Err(e) => {
            eprintln!("Error parsing board, starting fresh: {e}");
            None
        }
    }
}

/// File-backed storage with atomic writes (temp file + rename).
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStorage { path }
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let mut buf = String::new();
        match File::open(&self.path).and_then(|mut f| f.read_to_string(&mut buf)) {
            Ok(_) => Some(buf),
            Err(e) => {
                eprintln!("Error reading board, starting fresh: {e}");
                None
            }
        }
    }

    fn write(&mut self, payload: &str) -> io::Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(payload.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory storage for tests. The backing cell is shared so a test can
/// inspect the payload and count writes after handing the storage to a
/// store.
#[cfg(test)]
pub(crate) mod mem {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::Storage;

    #[derive(Default)]
    pub struct MemoryCell {
        pub payload: Option<String>,
        pub writes: usize,
    }

    pub struct MemoryStorage {
        cell: Rc<RefCell<MemoryCell>>,
    }

    impl MemoryStorage {
        pub fn new() -> (Self, Rc<RefCell<MemoryCell>>) {
            let cell = Rc::new(RefCell::new(MemoryCell::default()));
            let storage = MemoryStorage {
                cell: Rc::clone(&cell),
            };
            (storage, cell)
        }
    }

    impl Storage for MemoryStorage {
        fn read(&self) -> Option<String> {
            self.cell.borrow().payload.clone()
        }

        fn write(&mut self, payload: &str) -> io::Result<()> {
            let mut cell = self.cell.borrow_mut();
            cell.payload = Some(payload.to_string());
            cell.writes += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::fields::{Priority, Status};

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task {
                id: 1,
                title: "Tablet view".into(),
                description: "Interface sketches".into(),
                status: Status::Pending,
                priority: Priority::High,
                created_at: Utc::now(),
            },
            Task {
                id: 2,
                title: "Mobile view".into(),
                description: String::new(),
                status: Status::InProgress,
                priority: Priority::Medium,
                created_at: Utc::now(),
            },
        ]
    }

    #[test]
    fn round_trip_preserves_ids_fields_and_order() {
        let tasks = sample_tasks();
        let decoded = decode(&encode(&tasks)).expect("decode");
        assert_eq!(decoded.len(), tasks.len());
        for (orig, back) in tasks.iter().zip(decoded.iter()) {
            assert_eq!(orig.id, back.id);
            assert_eq!(orig.title, back.title);
            assert_eq!(orig.description, back.description);
            assert_eq!(orig.status, back.status);
            assert_eq!(orig.priority, back.priority);
            assert_eq!(orig.created_at, back.created_at);
        }
    }

    #[test]
    fn wire_format_uses_stable_names_and_spellings() {
        let payload = encode(&sample_tasks());
        assert!(payload.contains("\"createdAt\""));
        assert!(payload.contains("\"pending\""));
        assert!(payload.contains("\"in-progress\""));
        assert!(payload.contains("\"high\""));
        assert!(payload.contains("\"medium\""));
    }

    #[test]
    fn malformed_payload_decodes_to_none() {
        assert!(decode("not json at all").is_none());
        assert!(decode("{\"tasks\": 1}").is_none());
    }

    #[test]
    fn file_storage_reads_back_what_it_wrote() {
        let path = std::env::temp_dir().join(format!("kanban-storage-{}.json", std::process::id()));
        let mut storage = JsonFileStorage::new(path.clone());
        assert!(storage.read().is_none());
        storage.write("[]").expect("write");
        assert_eq!(storage.read().as_deref(), Some("[]"));
        let _ = fs::remove_file(path);
    }
}
