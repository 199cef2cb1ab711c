use super::{DirEntry, Filesystem};
use std::collections::BTreeMap;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

#[derive(Clone, Debug)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// In-memory [`Filesystem`] used to test the stores without touching disk.
///
/// Paths are treated as opaque keys; a path whose parent is empty (a bare relative name) or
/// absent (`/`) is considered to have an existing parent. Directory enumeration order is the
/// lexical order of names.
#[derive(Debug, Default)]
pub struct MemoryFs {
    nodes: Mutex<BTreeMap<PathBuf, Node>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a file's raw bytes.
    pub fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.lock().get(path) {
            Some(Node::File(bytes)) => Ok(bytes.clone()),
            Some(Node::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Node>> {
        self.nodes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn parent_exists(nodes: &BTreeMap<PathBuf, Node>, path: &Path) -> bool {
        match path.parent() {
            None => true,
            Some(parent) if parent.as_os_str().is_empty() => true,
            Some(parent) => matches!(nodes.get(parent), Some(Node::Dir)),
        }
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::NotFound,
        format!("no such file or directory: {}", path.display()),
    )
}

fn is_a_directory(path: &Path) -> io::Error {
    io::Error::new(
        ErrorKind::Other,
        format!("is a directory: {}", path.display()),
    )
}

impl Filesystem for MemoryFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let bytes = self.read(path)?;
        String::from_utf8(bytes).map_err(|e| io::Error::new(ErrorKind::InvalidData, e))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut nodes = self.lock();
        if !Self::parent_exists(&nodes, path) {
            return Err(not_found(path));
        }
        if let Some(Node::Dir) = nodes.get(path) {
            return Err(is_a_directory(path));
        }
        nodes.insert(path.to_path_buf(), Node::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        if nodes.contains_key(path) {
            return Err(io::Error::new(
                ErrorKind::AlreadyExists,
                format!("already exists: {}", path.display()),
            ));
        }
        if !Self::parent_exists(&nodes, path) {
            return Err(not_found(path));
        }
        nodes.insert(path.to_path_buf(), Node::Dir);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        let mut ancestors: Vec<&Path> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        ancestors.reverse();

        for ancestor in ancestors {
            match nodes.get(ancestor) {
                Some(Node::Dir) => {}
                Some(Node::File(_)) => {
                    return Err(io::Error::new(
                        ErrorKind::AlreadyExists,
                        format!("file exists: {}", ancestor.display()),
                    ))
                }
                None => {
                    nodes.insert(ancestor.to_path_buf(), Node::Dir);
                }
            }
        }
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        match nodes.get(path) {
            Some(Node::File(_)) => {
                nodes.remove(path);
                Ok(())
            }
            Some(Node::Dir) => Err(is_a_directory(path)),
            None => Err(not_found(path)),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut nodes = self.lock();
        match nodes.get(path) {
            Some(Node::Dir) => {
                nodes.retain(|key, _| !key.starts_with(path));
                Ok(())
            }
            Some(Node::File(_)) => Err(io::Error::new(
                ErrorKind::Other,
                format!("not a directory: {}", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let nodes = self.lock();
        if !matches!(nodes.get(path), Some(Node::Dir)) {
            return Err(not_found(path));
        }

        Ok(nodes
            .iter()
            .filter(|(key, _)| key.parent() == Some(path))
            .filter_map(|(key, node)| {
                let name = key.file_name()?.to_str()?.to_string();
                Some(DirEntry {
                    name,
                    is_dir: matches!(node, Node::Dir),
                })
            })
            .collect())
    }

    fn is_dir(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(Node::Dir))
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(Node::File(_)))
    }
}
