use crate::domain::audit_log::NewAuditLog;
use crate::domain::types::{AuditCategory, VehicleCategory, VehicleId, VehicleStatus};
use crate::domain::vehicle::{NewVehicle, UpdateVehicle, Vehicle};
use crate::dto::list::ListView;
use crate::dto::vehicles::VehiclesPageData;
use crate::forms::vehicles::{AddVehicleForm, UpdateVehicleForm};
use crate::query::state::ListParams;
use crate::read_model::VehicleReadModel;
use crate::repository::{AuditLogWriter, VehicleReader, VehicleWriter};
use crate::services::{ServiceError, ServiceResult, list_state, record_audit};

/// Loads one page of vehicles plus the status summary of the filtered set.
pub fn load_vehicles_page<R>(repo: &R, params: &ListParams) -> ServiceResult<VehiclesPageData>
where
    R: VehicleReader + ?Sized,
{
    let state = list_state::<VehicleStatus, VehicleCategory>(params)?;
    let (total, vehicles, stats) = repo.vehicle_page(state.to_query())?;

    Ok(VehiclesPageData {
        list: ListView::new(&state, total, vehicles),
        stats,
    })
}

/// Validates the add-vehicle form and registers the vehicle.
pub fn add_vehicle<R>(
    repo: &R,
    read_model: &VehicleReadModel,
    form: AddVehicleForm,
) -> ServiceResult<Vehicle>
where
    R: VehicleWriter + AuditLogWriter + ?Sized,
{
    let new_vehicle = NewVehicle::try_from(form).map_err(|err| {
        log::error!("Failed to validate vehicle form: {err}");
        ServiceError::from(err)
    })?;

    let vehicle = repo.create_vehicle(&new_vehicle)?;
    read_model.invalidate();
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Vehicle, "vehicle.create", vehicle.plate_number.as_str()),
    );

    Ok(vehicle)
}

/// Applies the status / odometer change of a vehicle row.
pub fn update_vehicle<R>(
    repo: &R,
    read_model: &VehicleReadModel,
    vehicle_id: i32,
    form: UpdateVehicleForm,
) -> ServiceResult<Vehicle>
where
    R: VehicleWriter + AuditLogWriter + ?Sized,
{
    let id = VehicleId::new(vehicle_id)?;
    let updates = UpdateVehicle::try_from(form)?;

    let vehicle = repo.update_vehicle(id, &updates)?;
    read_model.invalidate();
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Vehicle, "vehicle.update", vehicle.plate_number.as_str())
            .details(format!(
                "status={} mileage_km={}",
                vehicle.status, vehicle.mileage_km
            )),
    );

    Ok(vehicle)
}

pub fn delete_vehicle<R>(
    repo: &R,
    read_model: &VehicleReadModel,
    vehicle_id: i32,
) -> ServiceResult<()>
where
    R: VehicleWriter + AuditLogWriter + ?Sized,
{
    let id = VehicleId::new(vehicle_id)?;
    repo.delete_vehicle(id)?;
    read_model.invalidate();
    record_audit(
        repo,
        NewAuditLog::info(AuditCategory::Vehicle, "vehicle.delete", format!("vehicle/{id}")),
    );
    Ok(())
}
