use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
const FLEET_LEN: usize = 10;

/// Ships every player must place: 1 carrier, 2 submarines, 3 destroyers
/// and 4 frigates.
pub const FLEET: [ShipKind; FLEET_LEN] = [
    ShipKind::Carrier,
    ShipKind::Submarine,
    ShipKind::Submarine,
    ShipKind::Destroyer,
    ShipKind::Destroyer,
    ShipKind::Destroyer,
    ShipKind::Frigate,
    ShipKind::Frigate,
    ShipKind::Frigate,
    ShipKind::Frigate,
];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_FLEET_CELLS: usize = 4 + 3 + 3 + 2 + 2 + 2 + 1 + 1 + 1 + 1;

/// Random positions tried for a single ship before giving up on it.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Full-board placement passes the machine runs before accepting a short fleet.
pub const MAX_FLEET_PASSES: usize = 5;

pub const MACHINE_NAME: &str = "Machine";
