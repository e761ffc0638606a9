use std::collections::BTreeSet;

use super::domain::{RoomNumber, Tenant, TenantId};
use crate::properties::PropertyId;

/// Rooms held by active tenants of `property`, ignoring `exclude`.
pub fn occupied_rooms<'a>(
    tenants: impl IntoIterator<Item = &'a Tenant>,
    property: &PropertyId,
    exclude: Option<&TenantId>,
) -> BTreeSet<RoomNumber> {
    tenants
        .into_iter()
        .filter(|tenant| Some(&tenant.id) != exclude)
        .filter_map(Tenant::occupied_room)
        .filter(|(held_at, _)| *held_at == property)
        .map(|(_, room)| room)
        .collect()
}

/// `1..=bedrooms` minus the occupied rooms, ascending.
pub fn available_rooms(bedrooms: u16, occupied: &BTreeSet<RoomNumber>) -> Vec<RoomNumber> {
    (1..=bedrooms)
        .map(RoomNumber)
        .filter(|room| !occupied.contains(room))
        .collect()
}

/// The active tenant already holding the room `candidate` wants, if any.
pub fn room_holder<'a>(
    tenants: impl IntoIterator<Item = &'a Tenant>,
    candidate: &Tenant,
) -> Option<&'a Tenant> {
    let (property, room) = candidate.occupied_room()?;
    tenants.into_iter().find(|tenant| {
        tenant.id != candidate.id && tenant.occupied_room() == Some((property, room))
    })
}
