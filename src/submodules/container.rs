use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ndarray::{s, Array1, ArrayD, Ix2, Ix3};

use super::{errors::{DataError, DataResult}, type_lib::NumericData};

/// Outcome of a lookup that is allowed to miss.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

pub trait ArrayContainer {
    fn read_table(&self, name: &str) -> DataResult<Lookup<ArrayD<NumericData>>>;
}

pub trait ContainerStore {
    fn open(&self, path: &Path) -> DataResult<Lookup<Box<dyn ArrayContainer>>>;
}

/// `table[:, column]` of a two-dimensional table.
pub fn final_column(table: ArrayD<NumericData>, column: usize, path: &Path, name: &str) -> DataResult<Array1<NumericData>> {
    let table = table
        .into_dimensionality::<Ix2>()
        .map_err(|err| DataError::malformed(path, format!("{name}: {err}")))?;
    if column >= table.ncols() {
        return Err(DataError::malformed(path, format!("{name}: column {column} missing")));
    }
    Ok(table.slice(s![.., column]).to_owned())
}

/// `history[-1, :, column]` of a `(times, cells, fields)` history.
pub fn last_time_column(history: ArrayD<NumericData>, column: usize, path: &Path, name: &str) -> DataResult<Array1<NumericData>> {
    let history = history
        .into_dimensionality::<Ix3>()
        .map_err(|err| DataError::malformed(path, format!("{name}: {err}")))?;
    let (times, _, fields) = history.dim();
    if times == 0 || column >= fields {
        return Err(DataError::malformed(path, format!("{name}: no column {column} at the last time")));
    }
    Ok(history.slice(s![times - 1, .., column]).to_owned())
}

#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    tables: HashMap<String, ArrayD<NumericData>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        MemoryContainer::default()
    }

    pub fn with_table(mut self, name: &str, table: ArrayD<NumericData>) -> Self {
        self.tables.insert(name.to_string(), table);
        self
    }
}

impl ArrayContainer for MemoryContainer {
    fn read_table(&self, name: &str) -> DataResult<Lookup<ArrayD<NumericData>>> {
        Ok(match self.tables.get(name) {
            Some(table) => Lookup::Found(table.clone()),
            None => Lookup::NotFound,
        })
    }
}

/// Containers kept in memory, keyed by the path they would live at.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    containers: HashMap<PathBuf, MemoryContainer>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, container: MemoryContainer) {
        self.containers.insert(path.into(), container);
    }
}

impl ContainerStore for MemoryStore {
    fn open(&self, path: &Path) -> DataResult<Lookup<Box<dyn ArrayContainer>>> {
        Ok(match self.containers.get(path) {
            Some(container) => Lookup::Found(Box::new(container.clone())),
            None => Lookup::NotFound,
        })
    }
}

#[cfg(feature = "hdf5")]
mod hdf5_store {
    use std::path::{Path, PathBuf};

    use ndarray::ArrayD;
    use tracing::debug;

    use super::{ArrayContainer, ContainerStore, Lookup};
    use crate::submodules::{errors::{DataError, DataResult}, type_lib::NumericData};

    pub struct Hdf5Container {
        path: PathBuf,
        file: hdf5::File,
    }

    impl ArrayContainer for Hdf5Container {
        fn read_table(&self, name: &str) -> DataResult<Lookup<ArrayD<NumericData>>> {
            if !self.file.link_exists(name) {
                return Ok(Lookup::NotFound);
            }
            let table = self
                .file
                .dataset(name)
                .and_then(|dataset| dataset.read_dyn::<NumericData>())
                .map_err(|err| DataError::malformed(&self.path, format!("{name}: {err}")))?;
            Ok(Lookup::Found(table))
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct Hdf5Store;

    impl ContainerStore for Hdf5Store {
        fn open(&self, path: &Path) -> DataResult<Lookup<Box<dyn ArrayContainer>>> {
            if !path.is_file() {
                return Ok(Lookup::NotFound);
            }
            debug!(path = %path.display(), "opening hdf5 container");
            let file = hdf5::File::open(path)
                .map_err(|err| DataError::malformed(path, err.to_string()))?;
            Ok(Lookup::Found(Box::new(Hdf5Container { path: path.to_path_buf(), file })))
        }
    }
}

#[cfg(feature = "hdf5")]
pub use hdf5_store::{Hdf5Container, Hdf5Store};

/// Stand-in used when the crate is built without HDF5 support.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl ContainerStore for UnavailableStore {
    fn open(&self, path: &Path) -> DataResult<Lookup<Box<dyn ArrayContainer>>> {
        Err(DataError::not_found(path, "container support requires the `hdf5` feature"))
    }
}

/// Store for on-disk `.h5` containers.
pub fn default_store() -> Box<dyn ContainerStore> {
    #[cfg(feature = "hdf5")]
    {
        Box::new(Hdf5Store)
    }
    #[cfg(not(feature = "hdf5"))]
    {
        Box::new(UnavailableStore)
    }
}


#[cfg(all(test, feature = "hdf5"))]
mod hdf5_tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use tempfile::tempdir;

    #[test]
    fn hdf5_store_reads_final_and_history_tables() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.h5");
        {
            let file = hdf5::File::create(&path).unwrap();
            let final_table = Array2::from_shape_fn((3, 4), |(i, j)| (10 * i + j) as f64);
            let history = Array3::from_shape_fn((2, 3, 4), |(t, i, j)| (100 * t + 10 * i + j) as f64);
            file.new_dataset_builder().with_data(&final_table).create("finaldata").unwrap();
            file.new_dataset_builder().with_data(&history).create("solution").unwrap();
        }

        let Lookup::Found(container) = Hdf5Store.open(&path).unwrap() else {
            panic!("container written above should open");
        };
        let Lookup::Found(final_table) = container.read_table("finaldata").unwrap() else {
            panic!("finaldata missing");
        };
        assert_eq!(final_table.shape(), &[3, 4]);
        assert_eq!(final_column(final_table, 3, &path, "finaldata").unwrap().to_vec(), vec![3.0, 13.0, 23.0]);

        let Lookup::Found(history) = container.read_table("solution").unwrap() else {
            panic!("solution missing");
        };
        assert_eq!(history.shape(), &[2, 3, 4]);
        assert_eq!(last_time_column(history, 1, &path, "solution").unwrap().to_vec(), vec![101.0, 111.0, 121.0]);

        assert_eq!(container.read_table("bdnk").unwrap(), Lookup::NotFound);
    }

    #[test]
    fn hdf5_store_misses_absent_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(Hdf5Store.open(&dir.path().join("absent.h5")).unwrap(), Lookup::NotFound));
    }
}
