use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Which item of which dataset produced a crosshair value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ItemIdentity {
    pub dataset: usize,
    pub row: usize,
    pub column: usize,
}

/// Crosshair bookkeeping for a single draw pass.
///
/// Starts with the persisted crosshair values and an infinite distance.
/// Renderers report every item they draw; an item wins only if it lies
/// strictly closer to the anchor than the current winner.
#[derive(Clone, Debug, PartialEq)]
pub struct CrosshairState {
    anchor: Option<DVec2>,
    /// Data coordinates under the anchor.
    pub anchor_x: Option<f64>,
    pub anchor_y: Option<f64>,
    distance: f64,
    pub crosshair_x: Option<f64>,
    pub crosshair_y: Option<f64>,
    winner: Option<ItemIdentity>,
}

impl CrosshairState {
    pub fn new(anchor: Option<DVec2>, crosshair_x: Option<f64>, crosshair_y: Option<f64>) -> Self {
        Self {
            anchor,
            anchor_x: None,
            anchor_y: None,
            distance: f64::INFINITY,
            crosshair_x,
            crosshair_y,
            winner: None,
        }
    }

    pub fn anchor(&self) -> Option<DVec2> {
        self.anchor
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn winner(&self) -> Option<ItemIdentity> {
        self.winner
    }

    /// Offers an item at canvas point `pixel`. Returns whether it became the
    /// new winner. Without an anchor nothing is ever adopted.
    pub fn update_crosshair(&mut self, data_x: f64, data_y: f64, pixel: DVec2, item: ItemIdentity) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        let d = anchor.distance(pixel);
        if d < self.distance {
            self.distance = d;
            self.crosshair_x = Some(data_x);
            self.crosshair_y = Some(data_y);
            self.winner = Some(item);
            true
        } else {
            false
        }
    }
}

/// Persisted state of one crosshair (domain or range).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Crosshair {
    pub visible: bool,
    /// Follow the nearest drawn item instead of the pointer.
    pub locked_on_data: bool,
    pub value: Option<f64>,
}

impl Crosshair {
    pub fn from_config(config: &CrosshairConfig) -> Self {
        Self {
            visible: config.visible,
            locked_on_data: config.locked_on_data,
            value: None,
        }
    }

    /// Adopts the outcome of a draw pass: the winning item's value when
    /// locked on data, otherwise the value under the pointer.
    pub fn finalize(&mut self, from_data: Option<f64>, had_winner: bool, from_pointer: Option<f64>) {
        if self.locked_on_data {
            if had_winner {
                self.value = from_data;
            }
        } else if let Some(value) = from_pointer {
            self.value = Some(value);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrosshairConfig {
    pub visible: bool,
    pub locked_on_data: bool,
}

impl Default for CrosshairConfig {
    fn default() -> Self {
        Self {
            visible: false,
            locked_on_data: true,
        }
    }
}
