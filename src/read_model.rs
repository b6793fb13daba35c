//! Shared vehicle list used by the lease and maintenance pickers.

use std::sync::Arc;

use log::{debug, warn};

use crate::domain::vehicle::Vehicle;
use crate::query::sequence::{Latest, RequestSequence};
use crate::repository::errors::RepositoryResult;
use crate::repository::{VehicleListQuery, VehicleReader};

/// Cached snapshot of every vehicle.
///
/// Refreshes are sequence-tagged: a refresh that finishes after a newer one
/// (or after an invalidation) is discarded. A failed refresh leaves the
/// current snapshot untouched.
#[derive(Debug, Default)]
pub struct VehicleReadModel {
    sequence: RequestSequence,
    latest: Latest<Arc<Vec<Vehicle>>>,
}

impl VehicleReadModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<Arc<Vec<Vehicle>>> {
        self.latest.get()
    }

    /// Returns the snapshot, loading it first when there is none.
    pub fn get_or_refresh<R>(&self, repo: &R) -> RepositoryResult<Arc<Vec<Vehicle>>>
    where
        R: VehicleReader + ?Sized,
    {
        match self.snapshot() {
            Some(vehicles) => Ok(vehicles),
            None => self.refresh(repo),
        }
    }

    /// Reloads the vehicle list and returns the newest accepted snapshot.
    pub fn refresh<R>(&self, repo: &R) -> RepositoryResult<Arc<Vec<Vehicle>>>
    where
        R: VehicleReader + ?Sized,
    {
        let ticket = self.sequence.issue();
        let vehicles = match repo.list_vehicles(VehicleListQuery::new()) {
            Ok((_, vehicles)) => Arc::new(vehicles),
            Err(e) => {
                warn!("Vehicle list refresh failed, keeping previous snapshot: {e}");
                return Err(e);
            }
        };

        if self.latest.accept(ticket, Arc::clone(&vehicles)) {
            return Ok(vehicles);
        }
        debug!("Discarding superseded vehicle list {ticket:?}");
        Ok(self.latest.get().unwrap_or(vehicles))
    }

    /// Drops the snapshot; refreshes already in flight are discarded.
    pub fn invalidate(&self) {
        self.latest.invalidate(self.sequence.issue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{VehicleCategory, VehicleStatus};
    use crate::domain::vehicle::NewVehicle;
    use crate::repository::VehicleWriter;
    use crate::repository::errors::RepositoryError;
    use crate::repository::memory::MemoryRepository;
    use crate::repository::mock::MockRepository;

    fn repo_with(plates: &[&str]) -> MemoryRepository {
        let repo = MemoryRepository::new();
        for plate in plates {
            let vehicle = NewVehicle::try_new(
                plate,
                "Ford",
                "Transit",
                2021,
                "VIN",
                0,
                VehicleStatus::Available,
                VehicleCategory::Van,
            )
            .unwrap();
            repo.create_vehicle(&vehicle).unwrap();
        }
        repo
    }

    #[test]
    fn get_or_refresh_loads_once() {
        let mut repo = MockRepository::new();
        repo.expect_list_vehicles()
            .times(1)
            .returning(|_| Ok((0, vec![])));
        let model = VehicleReadModel::new();

        assert!(model.get_or_refresh(&repo).unwrap().is_empty());
        assert!(model.get_or_refresh(&repo).unwrap().is_empty());
    }

    #[test]
    fn failed_refresh_keeps_stale_snapshot() {
        let model = VehicleReadModel::new();
        model.refresh(&repo_with(&["A-1"])).unwrap();

        let mut failing = MockRepository::new();
        failing
            .expect_list_vehicles()
            .returning(|_| Err(RepositoryError::ConnectionError("down".into())));

        assert!(model.refresh(&failing).is_err());
        assert_eq!(model.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn slower_older_refresh_is_discarded() {
        let model = Arc::new(VehicleReadModel::new());
        let newer = repo_with(&["NEW-1", "NEW-2"]);

        let mut slow = MockRepository::new();
        let inner = Arc::clone(&model);
        slow.expect_list_vehicles().returning(move |_| {
            // A newer refresh completes while this one is still in flight.
            inner.refresh(&newer).unwrap();
            Ok((0, vec![]))
        });

        let result = model.refresh(&slow).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(model.snapshot().unwrap().len(), 2);
    }

    #[test]
    fn invalidate_drops_snapshot() {
        let model = VehicleReadModel::new();
        model.refresh(&repo_with(&["A-1"])).unwrap();

        model.invalidate();

        assert!(model.snapshot().is_none());
    }
}
