use std::fmt;

use serde::{Deserialize, Serialize};

/// Top-level grouping shown as a header in the services dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceCategory {
    DrainageSolutions,
    GeneralPlumbing,
    GasFitting,
    HotWater,
    Roofing,
    AirConditioning,
}

static ALL_CATEGORIES: &[ServiceCategory] = &[
    ServiceCategory::DrainageSolutions,
    ServiceCategory::GeneralPlumbing,
    ServiceCategory::GasFitting,
    ServiceCategory::HotWater,
    ServiceCategory::Roofing,
    ServiceCategory::AirConditioning,
];

static DRAINAGE: &[Service] = &[
    Service::BlockedDrains,
    Service::BlockedToilet,
    Service::CctvDrainInspection,
    Service::HydroJetDrainCleaning,
    Service::BlockedStormwaterDrains,
    Service::PipeRelining,
];

static PLUMBING: &[Service] = &[
    Service::EmergencyPlumbing,
    Service::LeakDetection,
    Service::LeakingTaps,
    Service::WaterPressure,
    Service::ToiletRepairs,
    Service::BathroomRenovations,
];

static GAS: &[Service] = &[
    Service::GasLeakDetection,
    Service::GasLeakRepairs,
    Service::GasLineInstallation,
    Service::GasLineInspections,
    Service::EmergencyGasRepairs,
    Service::GasBbqInstallation,
];

static HOT_WATER: &[Service] = &[
    Service::GasHotWater,
    Service::ElectricHotWater,
    Service::HeatPump,
    Service::SolarHotWater,
    Service::HotWaterRepairs,
];

static ROOFING: &[Service] = &[
    Service::RoofInspections,
    Service::RoofLeakDetection,
    Service::RoofRepairs,
    Service::GutterCleaning,
    Service::GutterGuardInstallation,
];

static AIR_CONDITIONING: &[Service] = &[
    Service::SplitSystemInstallation,
    Service::DuctedAirConditioning,
    Service::AirConditioningRepairs,
    Service::AirConditioningServicing,
];

impl ServiceCategory {
    /// Returns all categories in dropdown order.
    pub fn all() -> &'static [ServiceCategory] {
        ALL_CATEGORIES
    }

    /// Returns the services listed under this category.
    pub fn services(self) -> &'static [Service] {
        match self {
            ServiceCategory::DrainageSolutions => DRAINAGE,
            ServiceCategory::GeneralPlumbing => PLUMBING,
            ServiceCategory::GasFitting => GAS,
            ServiceCategory::HotWater => HOT_WATER,
            ServiceCategory::Roofing => ROOFING,
            ServiceCategory::AirConditioning => AIR_CONDITIONING,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceCategory::DrainageSolutions => "Drainage Solutions",
            ServiceCategory::GeneralPlumbing => "General Plumbing",
            ServiceCategory::GasFitting => "Gas Fitting",
            ServiceCategory::HotWater => "Hot Water",
            ServiceCategory::Roofing => "Roofing",
            ServiceCategory::AirConditioning => "Air Conditioning",
        }
    }
}

#[mutants::skip]
impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single bookable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Service {
    BlockedDrains,
    BlockedToilet,
    CctvDrainInspection,
    HydroJetDrainCleaning,
    BlockedStormwaterDrains,
    PipeRelining,
    EmergencyPlumbing,
    LeakDetection,
    LeakingTaps,
    WaterPressure,
    ToiletRepairs,
    BathroomRenovations,
    GasLeakDetection,
    GasLeakRepairs,
    GasLineInstallation,
    GasLineInspections,
    EmergencyGasRepairs,
    GasBbqInstallation,
    GasHotWater,
    ElectricHotWater,
    HeatPump,
    SolarHotWater,
    HotWaterRepairs,
    RoofInspections,
    RoofLeakDetection,
    RoofRepairs,
    GutterCleaning,
    GutterGuardInstallation,
    SplitSystemInstallation,
    DuctedAirConditioning,
    AirConditioningRepairs,
    AirConditioningServicing,
}

impl Service {
    /// The category this service is listed under.
    pub fn category(self) -> ServiceCategory {
        match self {
            Service::BlockedDrains
            | Service::BlockedToilet
            | Service::CctvDrainInspection
            | Service::HydroJetDrainCleaning
            | Service::BlockedStormwaterDrains
            | Service::PipeRelining => ServiceCategory::DrainageSolutions,
            Service::EmergencyPlumbing
            | Service::LeakDetection
            | Service::LeakingTaps
            | Service::WaterPressure
            | Service::ToiletRepairs
            | Service::BathroomRenovations => ServiceCategory::GeneralPlumbing,
            Service::GasLeakDetection
            | Service::GasLeakRepairs
            | Service::GasLineInstallation
            | Service::GasLineInspections
            | Service::EmergencyGasRepairs
            | Service::GasBbqInstallation => ServiceCategory::GasFitting,
            Service::GasHotWater
            | Service::ElectricHotWater
            | Service::HeatPump
            | Service::SolarHotWater
            | Service::HotWaterRepairs => ServiceCategory::HotWater,
            Service::RoofInspections
            | Service::RoofLeakDetection
            | Service::RoofRepairs
            | Service::GutterCleaning
            | Service::GutterGuardInstallation => ServiceCategory::Roofing,
            Service::SplitSystemInstallation
            | Service::DuctedAirConditioning
            | Service::AirConditioningRepairs
            | Service::AirConditioningServicing => ServiceCategory::AirConditioning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Service::BlockedDrains => "Blocked Drains",
            Service::BlockedToilet => "Blocked Toilet",
            Service::CctvDrainInspection => "CCTV Drain Inspection",
            Service::HydroJetDrainCleaning => "Hydro Jet Drain Cleaning",
            Service::BlockedStormwaterDrains => "Blocked Stormwater Drains",
            Service::PipeRelining => "Pipe Relining",
            Service::EmergencyPlumbing => "Emergency Plumbing",
            Service::LeakDetection => "Leak Detection",
            Service::LeakingTaps => "Leaking Taps",
            Service::WaterPressure => "Water Pressure Solutions",
            Service::ToiletRepairs => "Toilet Installations & Repairs",
            Service::BathroomRenovations => "Bathroom Renovations",
            Service::GasLeakDetection => "Gas Leak Detection",
            Service::GasLeakRepairs => "Gas Leak Repairs",
            Service::GasLineInstallation => "Gas Line Installation",
            Service::GasLineInspections => "Gas Line Inspections",
            Service::EmergencyGasRepairs => "Emergency Gas Repairs",
            Service::GasBbqInstallation => "Gas BBQ Installation",
            Service::GasHotWater => "Gas Hot Water",
            Service::ElectricHotWater => "Electric Hot Water",
            Service::HeatPump => "Heat Pump",
            Service::SolarHotWater => "Solar Hot Water",
            Service::HotWaterRepairs => "Hot Water Repairs",
            Service::RoofInspections => "Roof Inspections",
            Service::RoofLeakDetection => "Roof Leak Detection",
            Service::RoofRepairs => "Roof Repairs",
            Service::GutterCleaning => "Gutter Cleaning",
            Service::GutterGuardInstallation => "Gutter Guard Installation",
            Service::SplitSystemInstallation => "Split System Installation",
            Service::DuctedAirConditioning => "Ducted Air Conditioning",
            Service::AirConditioningRepairs => "Air Conditioning Repairs",
            Service::AirConditioningServicing => "Air Conditioning Servicing",
        }
    }
}

#[mutants::skip]
impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Something the customer can tick in the services dropdown: either a whole
/// category header or one of its services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceItem {
    Category(ServiceCategory),
    Service(Service),
}

impl ServiceItem {
    pub fn label(self) -> &'static str {
        match self {
            ServiceItem::Category(c) => c.label(),
            ServiceItem::Service(s) => s.label(),
        }
    }
}

impl From<ServiceCategory> for ServiceItem {
    fn from(category: ServiceCategory) -> Self {
        ServiceItem::Category(category)
    }
}

impl From<Service> for ServiceItem {
    fn from(service: Service) -> Self {
        ServiceItem::Service(service)
    }
}

#[mutants::skip]
impl fmt::Display for ServiceItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
