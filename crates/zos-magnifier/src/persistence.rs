//! State serialization for storage
//!
//! The magnifier does not own a store. A `Snapshot` is handed to whatever
//! keyed state store the host uses, and restored from it on the next
//! session. Actor handles are session-local and never serialized; the
//! renderer supplies fresh ones on restore.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::MagnifierEngine;
use crate::error::{MagnifierError, MagnifierResult};
use crate::host::MagnifierHost;
use crate::math::ScreenRect;
use crate::region::{Placement, RegionConfig, ZoomRegion};
use crate::registry::REGION_CAPACITY;
use crate::types::{ActorHandle, Factors};

/// Persisted form of one region
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub viewport: ScreenRect,
    pub base_factors: Factors,
    #[serde(default)]
    pub placement: Placement,
}

impl RegionSnapshot {
    /// Reject degenerate viewports and non-positive factors
    pub fn validate(&self) -> MagnifierResult<()> {
        if !self.viewport.is_valid() {
            return Err(MagnifierError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.base_factors.validate()
    }
}

impl From<&ZoomRegion> for RegionSnapshot {
    fn from(region: &ZoomRegion) -> Self {
        Self {
            viewport: region.viewport,
            base_factors: region.base_factors,
            placement: region.placement,
        }
    }
}

/// Persisted magnifier state
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Zoom level per axis
    pub zoom: Factors,
    /// Regions in slot order
    #[serde(default)]
    pub regions: Vec<RegionSnapshot>,
}

impl Snapshot {
    /// Serialize to JSON
    pub fn to_json(&self) -> MagnifierResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> MagnifierResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<H: MagnifierHost> MagnifierEngine<H> {
    /// Capture zoom level and region layout
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            zoom: self.zoom().level(),
            regions: self.regions().iter().map(RegionSnapshot::from).collect(),
        }
    }

    /// Replace zoom level and regions with a snapshot's
    ///
    /// `handles` supplies `(content, cursor)` for each restored region. It
    /// is only called once every entry has been validated, so a rejected
    /// snapshot never issues handles. The regions previously installed are
    /// returned so their handles can be released.
    pub fn restore<F>(
        &mut self,
        snapshot: &Snapshot,
        mut handles: F,
    ) -> MagnifierResult<Vec<ZoomRegion>>
    where
        F: FnMut(&RegionSnapshot) -> (ActorHandle, ActorHandle),
    {
        snapshot.zoom.validate()?;
        if snapshot.regions.len() > REGION_CAPACITY {
            return Err(MagnifierError::CapacityExceeded {
                capacity: REGION_CAPACITY,
            });
        }
        for entry in &snapshot.regions {
            entry.validate()?;
        }
        let configs: Vec<RegionConfig> = snapshot
            .regions
            .iter()
            .map(|entry| {
                let (content, cursor) = handles(entry);
                RegionConfig::new(entry.viewport, entry.base_factors, content, cursor)
                    .with_placement(entry.placement)
            })
            .collect();

        let previous = self.clear_regions();
        self.zoom_mut().set_level(snapshot.zoom)?;
        for config in configs {
            self.add_region(config)?;
        }
        debug!(
            regions = self.regions().len(),
            zoom_x = snapshot.zoom.x,
            zoom_y = snapshot.zoom.y,
            "magnifier state restored"
        );
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;
    use crate::types::ScreenGeometry;

    fn engine() -> MagnifierEngine<StaticHost> {
        MagnifierEngine::with_defaults(StaticHost::new(ScreenGeometry::new(1920.0, 1080.0)))
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = Snapshot {
            zoom: Factors { x: 2.0, y: 2.0 },
            regions: vec![RegionSnapshot {
                viewport: ScreenRect::new(0, 0, 960, 540),
                base_factors: Factors { x: 2.0, y: 2.0 },
                placement: Placement::Lens,
            }],
        };
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"placement\":\"lens\""));
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_snapshot_defaults_missing_fields() {
        let snapshot = Snapshot::from_json(r#"{"zoom":{"x":4.0,"y":4.0}}"#).unwrap();
        assert!(snapshot.regions.is_empty());
    }

    #[test]
    fn test_restore_replaces_state() {
        let mut source = engine();
        source
            .mag_add(
                ScreenRect::new(0, 0, 960, 540),
                Factors::uniform(2.0).unwrap(),
                ActorHandle(1),
                ActorHandle(2),
            )
            .unwrap();
        source.zoom_in();
        let snapshot = source.snapshot();

        let mut target = engine();
        target
            .mag_add(
                ScreenRect::new(5, 5, 10, 10),
                Factors::uniform(3.0).unwrap(),
                ActorHandle(7),
                ActorHandle(8),
            )
            .unwrap();

        let mut next = 100;
        let previous = target
            .restore(&snapshot, |_| {
                next += 2;
                (ActorHandle(next), ActorHandle(next + 1))
            })
            .unwrap();

        assert_eq!(previous.len(), 1);
        assert_eq!(previous[0].content, ActorHandle(7));
        assert_eq!(target.zoom().level(), Factors { x: 2.0, y: 2.0 });
        assert_eq!(target.regions().len(), 1);
        assert_eq!(target.region(0).unwrap().content, ActorHandle(102));
        assert_eq!(target.snapshot(), snapshot);
    }

    #[test]
    fn test_restore_rejects_invalid_without_changes() {
        let mut target = engine();
        target
            .mag_add(
                ScreenRect::new(5, 5, 10, 10),
                Factors::uniform(3.0).unwrap(),
                ActorHandle(7),
                ActorHandle(8),
            )
            .unwrap();
        let before = target.snapshot();

        let bad = Snapshot {
            zoom: Factors { x: 2.0, y: 2.0 },
            regions: vec![RegionSnapshot {
                viewport: ScreenRect::new(0, 0, 0, 10),
                base_factors: Factors { x: 2.0, y: 2.0 },
                placement: Placement::Fixed,
            }],
        };
        let err = target.restore(&bad, |_| (ActorHandle(0), ActorHandle(0)));
        assert!(matches!(err, Err(MagnifierError::InvalidViewport { .. })));
        assert_eq!(target.snapshot(), before);
    }

    #[test]
    fn test_failed_restore_issues_no_handles() {
        let mut target = engine();
        let good = RegionSnapshot {
            viewport: ScreenRect::new(0, 0, 960, 540),
            base_factors: Factors { x: 2.0, y: 2.0 },
            placement: Placement::Fixed,
        };
        let bad = RegionSnapshot {
            viewport: ScreenRect::new(0, 0, 0, 540),
            ..good.clone()
        };
        let snapshot = Snapshot {
            zoom: Factors { x: 1.0, y: 1.0 },
            regions: vec![good.clone(), bad],
        };

        let mut issued = 0;
        let err = target.restore(&snapshot, |_| {
            issued += 1;
            (ActorHandle(issued), ActorHandle(issued + 100))
        });
        assert!(matches!(err, Err(MagnifierError::InvalidViewport { .. })));
        assert_eq!(issued, 0);

        let oversized = Snapshot {
            zoom: Factors { x: 1.0, y: 1.0 },
            regions: vec![good; REGION_CAPACITY + 1],
        };
        let err = target.restore(&oversized, |_| {
            issued += 1;
            (ActorHandle(issued), ActorHandle(issued + 100))
        });
        assert_eq!(
            err.unwrap_err(),
            MagnifierError::CapacityExceeded {
                capacity: REGION_CAPACITY
            }
        );
        assert_eq!(issued, 0);
        assert!(target.regions().is_empty());
    }
}
