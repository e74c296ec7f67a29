//! Trip collection, persisted as JSON

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::Utc;
use kniha_domain::repository::TripRepository;
use kniha_types::{Error, Result, Trip};

/// Trip store backed by `trips.json`, or by memory only
pub struct TripStore {
    store_path: Option<PathBuf>,
    trips: RefCell<HashMap<String, Trip>>,
}

impl TripStore {
    /// Create or load a trip store in `store_dir`
    pub fn open(store_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&store_dir)?;
        let store_path = store_dir.join("trips.json");

        let trips: HashMap<String, Trip> = if store_path.exists() {
            let file = File::open(&store_path)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).map_err(|e| {
                log::warn!("Trip store {} is corrupt: {}", store_path.display(), e);
                e
            })?
        } else {
            HashMap::new()
        };

        log::debug!("Opened trip store {} ({} trips)", store_path.display(), trips.len());

        Ok(Self {
            store_path: Some(store_path),
            trips: RefCell::new(trips),
        })
    }

    /// Store that is never written to disk
    pub fn in_memory() -> Self {
        Self {
            store_path: None,
            trips: RefCell::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.store_path.as_deref()
    }

    fn persist(&self, trips: &HashMap<String, Trip>) -> Result<()> {
        if let Some(ref path) = self.store_path {
            let file = File::create(path)?;
            let writer = BufWriter::new(file);
            serde_json::to_writer_pretty(writer, trips)?;
        }
        Ok(())
    }

    /// Apply `change` to a copy of the collection and keep it only if it was written
    fn commit<T, F>(&self, change: F) -> Result<T>
    where
        F: FnOnce(&mut HashMap<String, Trip>) -> Result<T>,
    {
        let mut staged = self.trips.borrow().clone();
        let value = change(&mut staged)?;
        self.persist(&staged)?;
        *self.trips.borrow_mut() = staged;
        Ok(value)
    }

    pub fn count(&self) -> usize {
        self.trips.borrow().len()
    }

    /// Lock a trip against further edits
    pub fn lock(&self, id: &str) -> Result<Trip> {
        self.set_locked(id, true)
    }

    pub fn unlock(&self, id: &str) -> Result<Trip> {
        self.set_locked(id, false)
    }

    fn set_locked(&self, id: &str, locked: bool) -> Result<Trip> {
        self.commit(|trips| {
            let trip = trips.get_mut(id).ok_or_else(|| Error::not_found("Trip", id))?;
            trip.locked = locked;
            trip.updated_at = Utc::now();
            Ok(trip.clone())
        })
    }
}

impl TripRepository for TripStore {
    fn append(&self, trips: &[Trip]) -> Result<()> {
        self.commit(|stored| {
            for trip in trips {
                stored.insert(trip.id.clone(), trip.clone());
            }
            Ok(())
        })
    }

    fn find_all(&self) -> Result<Vec<Trip>> {
        let mut trips: Vec<Trip> = self.trips.borrow().values().cloned().collect();
        trips.sort_by(|a, b| a.start_time.cmp(&b.start_time).then_with(|| a.id.cmp(&b.id)));
        Ok(trips)
    }

    fn find_by_id(&self, id: &str) -> Result<Option<Trip>> {
        Ok(self.trips.borrow().get(id).cloned())
    }

    fn update(&self, mut trip: Trip) -> Result<Trip> {
        self.commit(|trips| {
            let existing = trips
                .get(&trip.id)
                .ok_or_else(|| Error::not_found("Trip", trip.id.clone()))?;
            if existing.locked && trip.locked {
                return Err(Error::TripLocked(trip.id));
            }
            trip.updated_at = Utc::now();
            trips.insert(trip.id.clone(), trip.clone());
            Ok(trip)
        })
    }
}
