//! Open/closed state for the form's four dropdowns and the services
//! category tree.

use ratatui::layout::{Position, Rect};

use crate::model::ServiceCategory;

/// The dropdown affordances on the booking form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dropdown {
    Services,
    Time,
    Urgency,
    Date,
}

static ALL_DROPDOWNS: &[Dropdown] = &[
    Dropdown::Services,
    Dropdown::Time,
    Dropdown::Urgency,
    Dropdown::Date,
];

impl Dropdown {
    pub fn all() -> &'static [Dropdown] {
        ALL_DROPDOWNS
    }

    fn index(self) -> usize {
        match self {
            Dropdown::Services => 0,
            Dropdown::Time => 1,
            Dropdown::Urgency => 2,
            Dropdown::Date => 3,
        }
    }
}

/// Independent open flags for each dropdown plus the screen region each one
/// occupies (trigger and open panel together).
///
/// Opening one dropdown never closes another; the only cross-cutting rule is
/// [`pointer_down`](Self::pointer_down).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownState {
    open: [bool; 4],
    containers: [Option<Rect>; 4],
}

impl DropdownState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self, dropdown: Dropdown) -> bool {
        self.open[dropdown.index()]
    }

    /// Returns `true` if any dropdown is open.
    pub fn any_open(&self) -> bool {
        self.open.iter().any(|o| *o)
    }

    pub fn set_open(&mut self, dropdown: Dropdown, open: bool) {
        self.open[dropdown.index()] = open;
    }

    pub fn toggle(&mut self, dropdown: Dropdown) {
        let slot = &mut self.open[dropdown.index()];
        *slot = !*slot;
    }

    pub fn close_all(&mut self) {
        self.open = [false; 4];
    }

    /// Records where `dropdown` is drawn. `None` means it is not on screen.
    pub fn set_container(&mut self, dropdown: Dropdown, area: Option<Rect>) {
        self.containers[dropdown.index()] = area;
    }

    pub fn container(&self, dropdown: Dropdown) -> Option<Rect> {
        self.containers[dropdown.index()]
    }

    /// Applies a pointer-down at `target`: every dropdown whose container is
    /// on screen and does not contain the target is closed.
    ///
    /// Dropdowns without a recorded container are left alone.
    pub fn pointer_down(&mut self, target: Position) {
        for dropdown in Dropdown::all() {
            if let Some(area) = self.container(*dropdown)
                && !area.contains(target)
            {
                self.set_open(*dropdown, false);
            }
        }
    }
}

/// Which service categories are expanded in the services dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryExpansion {
    drainage_solutions: bool,
    general_plumbing: bool,
    gas_fitting: bool,
    hot_water: bool,
    roofing: bool,
    air_conditioning: bool,
}

impl CategoryExpansion {
    fn slot(&mut self, category: ServiceCategory) -> &mut bool {
        match category {
            ServiceCategory::DrainageSolutions => &mut self.drainage_solutions,
            ServiceCategory::GeneralPlumbing => &mut self.general_plumbing,
            ServiceCategory::GasFitting => &mut self.gas_fitting,
            ServiceCategory::HotWater => &mut self.hot_water,
            ServiceCategory::Roofing => &mut self.roofing,
            ServiceCategory::AirConditioning => &mut self.air_conditioning,
        }
    }

    pub fn is_expanded(&self, category: ServiceCategory) -> bool {
        match category {
            ServiceCategory::DrainageSolutions => self.drainage_solutions,
            ServiceCategory::GeneralPlumbing => self.general_plumbing,
            ServiceCategory::GasFitting => self.gas_fitting,
            ServiceCategory::HotWater => self.hot_water,
            ServiceCategory::Roofing => self.roofing,
            ServiceCategory::AirConditioning => self.air_conditioning,
        }
    }

    pub fn toggle(&mut self, category: ServiceCategory) {
        let slot = self.slot(category);
        *slot = !*slot;
    }
}
