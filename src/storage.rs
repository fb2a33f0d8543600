use std::fs;
use std::io;
use std::path::Path;

/// Reads, writes and removes whole named resources as bytes.
pub trait ByteStore {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
    fn remove(&mut self, path: &Path) -> io::Result<()>;
}

/// The local filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsStore;

impl ByteStore for FsStore {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        fs::remove_file(path)
    }
}

impl<S: ByteStore + ?Sized> ByteStore for &mut S {
    fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
        (**self).read_bytes(path)
    }

    fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        (**self).write_bytes(path, bytes)
    }

    fn remove(&mut self, path: &Path) -> io::Result<()> {
        (**self).remove(path)
    }
}

#[cfg(test)]
pub(crate) use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::ByteStore;

    /// A store that keeps everything in a map, for tests.
    #[derive(Debug, Default)]
    pub(crate) struct MemoryStore {
        pub(crate) files: HashMap<PathBuf, Vec<u8>>,
    }

    impl ByteStore for MemoryStore {
        fn read_bytes(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())))
        }

        fn write_bytes(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
            self.files.insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }

        fn remove(&mut self, path: &Path) -> io::Result<()> {
            self.files
                .remove(path)
                .map(drop)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display())))
        }
    }
}
