use std::collections::HashMap;

pub const BRAND_PARAM: &str = "brand";
pub const RAM_PARAM: &str = "ram_mb";
pub const DISK_PARAM: &str = "disk_mb";
pub const NETWORK_PARAM: &str = "network";
pub const PLACEMENT_PARAM: &str = "placement";

/// Deployment-fixed fields no entity carries: workload brand, sizing, network
/// and placement target.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadDefaults {
    pub brand: String,
    pub ram_mb: u32,
    pub disk_mb: u32,
    pub network: String,
    pub placement: String,
}

impl WorkloadDefaults {
    pub fn apply_to(self, params: &mut HashMap<String, String>) {
        params.insert(String::from(BRAND_PARAM), self.brand);
        params.insert(String::from(RAM_PARAM), self.ram_mb.to_string());
        params.insert(String::from(DISK_PARAM), self.disk_mb.to_string());
        params.insert(String::from(NETWORK_PARAM), self.network);
        params.insert(String::from(PLACEMENT_PARAM), self.placement);
    }
}

pub trait PlacementPolicy {
    fn workload_defaults(&self) -> WorkloadDefaults;
}

/// Stand-in for a placement engine that doesn't exist yet: every workload
/// gets the same brand, sizing and network.
pub struct FixedPlacementPolicy;

impl PlacementPolicy for FixedPlacementPolicy {
    fn workload_defaults(&self) -> WorkloadDefaults {
        WorkloadDefaults {
            brand: String::from("standard"),
            ram_mb: 256,
            disk_mb: 10240,
            network: String::from("admin"),
            placement: String::from("any"),
        }
    }
}
