//! Hand-off payload for the allocation/packing service.
//!
//! Wraps a [`CommitReport`] with a job id and timestamp. The packing service
//! assigns item groups to zones by `id`; labels are for display only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::container::ContainerConfig;
use crate::projection::{CommitReport, ProjectedZone, RejectedZone};

/// One row of a cutting job, as stored by the job service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuttingJob {
    pub label: String,
    /// Zone extent along its own x axis.
    pub length: f64,
    /// Zone extent along its own y axis.
    pub width: f64,
    /// Container interior height.
    pub height: f64,
    /// Zone centre in plan units.
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
}

/// Everything the packing step needs about a committed zone layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneHandoff {
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub container: ContainerConfig,
    pub zones: Vec<ProjectedZone>,
    #[serde(default)]
    pub rejected: Vec<RejectedZone>,
}

impl ZoneHandoff {
    pub fn new(container: ContainerConfig, report: CommitReport) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            created_at: Utc::now(),
            container,
            zones: report.accepted,
            rejected: report.rejected,
        }
    }

    /// Cutting-job rows for the accepted zones.
    pub fn cutting_jobs(&self) -> Vec<CuttingJob> {
        self.zones
            .iter()
            .map(|p| CuttingJob {
                label: p.label.clone(),
                length: p.zone.width,
                width: p.zone.height,
                height: self.container.height,
                x: p.zone.center.x,
                y: p.zone.center.y,
                rotation: p.zone.rotation,
            })
            .collect()
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
