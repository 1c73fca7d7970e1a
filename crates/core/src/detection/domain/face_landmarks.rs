//! Eight-group facial landmarks as returned by a landmark extractor.
//!
//! Points are normalized relative to the face region they were extracted
//! from. Group order is fixed: consumers index into the flattened sequence
//! positionally, so `LandmarkGroup::ALL` must never be reordered.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::shared::point::Point;
use crate::shared::region::Region;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LandmarkGroup {
    LeftEyebrow,
    RightEyebrow,
    NoseCrest,
    Nose,
    LeftEye,
    RightEye,
    OuterLips,
    InnerLips,
}

impl LandmarkGroup {
    pub const ALL: [LandmarkGroup; 8] = [
        LandmarkGroup::LeftEyebrow,
        LandmarkGroup::RightEyebrow,
        LandmarkGroup::NoseCrest,
        LandmarkGroup::Nose,
        LandmarkGroup::LeftEye,
        LandmarkGroup::RightEye,
        LandmarkGroup::OuterLips,
        LandmarkGroup::InnerLips,
    ];
}

/// Landmark groups for one face. Groups the extractor could not find are
/// simply absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FaceLandmarks {
    groups: BTreeMap<LandmarkGroup, Vec<Point>>,
}

impl FaceLandmarks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: LandmarkGroup, points: Vec<Point>) -> Self {
        self.set_group(group, points);
        self
    }

    pub fn set_group(&mut self, group: LandmarkGroup, points: Vec<Point>) {
        self.groups.insert(group, points);
    }

    pub fn group(&self, group: LandmarkGroup) -> Option<&[Point]> {
        self.groups.get(&group).map(|v| v.as_slice())
    }

    pub fn point_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Flattens all groups in `LandmarkGroup::ALL` order, mapping each
    /// region-local point into the region's enclosing space.
    pub fn flatten_into(&self, region: &Region) -> Vec<Point> {
        let mut points = Vec::with_capacity(self.point_count());
        for group in LandmarkGroup::ALL {
            if let Some(local) = self.groups.get(&group) {
                points.extend(local.iter().map(|p| region.to_enclosing(*p)));
            }
        }
        points
    }
}
