//! Guided maintenance workflow.
//!
//! A job moves through Preparation, Checklist, Parts and Sign-off before it
//! can be finished. Each forward step validates what the technician entered;
//! finishing produces the summary record kept in maintenance history.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::schema::{Asset, MaintenanceRecord};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowStep {
    Preparation,
    Checklist,
    Parts,
    SignOff,
    Complete,
}

impl WorkflowStep {
    fn next(self) -> Self {
        match self {
            WorkflowStep::Preparation => WorkflowStep::Checklist,
            WorkflowStep::Checklist => WorkflowStep::Parts,
            WorkflowStep::Parts => WorkflowStep::SignOff,
            WorkflowStep::SignOff | WorkflowStep::Complete => WorkflowStep::Complete,
        }
    }

    fn previous(self) -> Self {
        match self {
            WorkflowStep::Preparation | WorkflowStep::Checklist => WorkflowStep::Preparation,
            WorkflowStep::Parts => WorkflowStep::Checklist,
            WorkflowStep::SignOff => WorkflowStep::Parts,
            WorkflowStep::Complete => WorkflowStep::Complete,
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStep::Preparation => "preparation",
            WorkflowStep::Checklist => "checklist",
            WorkflowStep::Parts => "parts",
            WorkflowStep::SignOff => "sign-off",
            WorkflowStep::Complete => "complete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub label: String,
    pub checked: bool,
}

/// In-progress maintenance job for one asset.
#[derive(Debug, Clone)]
pub struct MaintenanceWorkflow {
    asset_id: String,
    asset_name: String,
    step: WorkflowStep,
    technician: String,
    notes: String,
    checklist: Vec<ChecklistItem>,
    parts_used: Vec<String>,
    signature: Option<String>,
}

const STANDARD_CHECKS: [&str; 3] = [
    "Isolate and lock out energy sources",
    "Inspect for leaks, corrosion and abnormal noise",
    "Clean work area and remove lockout",
];

impl MaintenanceWorkflow {
    /// Start a job; the checklist covers standard checks plus one per wear part.
    pub fn new(asset: &Asset) -> Self {
        let wear_checks = asset
            .wear_components()
            .map(|c| format!("Inspect {} ({})", c.description.to_lowercase(), c.part_number));
        let checklist = STANDARD_CHECKS
            .iter()
            .map(|s| s.to_string())
            .chain(wear_checks)
            .map(|label| ChecklistItem {
                label,
                checked: false,
            })
            .collect();

        Self {
            asset_id: asset.id.clone(),
            asset_name: asset.name.clone(),
            step: WorkflowStep::Preparation,
            technician: String::new(),
            notes: String::new(),
            checklist,
            parts_used: Vec::new(),
            signature: None,
        }
    }

    pub fn step(&self) -> WorkflowStep {
        self.step
    }

    pub fn checklist(&self) -> &[ChecklistItem] {
        &self.checklist
    }

    pub fn set_technician(&mut self, name: &str) {
        self.technician = name.trim().to_string();
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.trim().to_string();
    }

    /// Tick a checklist item by index.
    pub fn check(&mut self, index: usize) -> Result<()> {
        let len = self.checklist.len();
        let item = self.checklist.get_mut(index).ok_or_else(|| {
            Error::InvalidInput(format!("checklist item {} out of range (0..{})", index, len))
        })?;
        item.checked = true;
        Ok(())
    }

    pub fn check_all(&mut self) {
        for item in &mut self.checklist {
            item.checked = true;
        }
    }

    /// Record a consumed part. Repeats are kept once.
    pub fn add_part(&mut self, part_number: &str) {
        let part_number = part_number.trim();
        if !part_number.is_empty() && !self.parts_used.iter().any(|p| p == part_number) {
            self.parts_used.push(part_number.to_string());
        }
    }

    pub fn sign(&mut self, signature: &str) {
        let signature = signature.trim();
        self.signature = (!signature.is_empty()).then(|| signature.to_string());
    }

    /// Validate the current step and move to the next one.
    ///
    /// Sign-off only completes through [`finish`](Self::finish).
    pub fn advance(&mut self) -> Result<WorkflowStep> {
        match self.step {
            WorkflowStep::Preparation if self.technician.is_empty() => {
                return Err(Error::InvalidInput("technician name is required".to_string()));
            }
            WorkflowStep::Checklist => {
                let open = self.checklist.iter().filter(|c| !c.checked).count();
                if open > 0 {
                    return Err(Error::InvalidInput(format!(
                        "{} checklist item(s) not completed",
                        open
                    )));
                }
            }
            WorkflowStep::SignOff | WorkflowStep::Complete => {
                return Err(Error::InvalidInput(format!(
                    "cannot advance from {} step",
                    self.step
                )));
            }
            _ => {}
        }

        self.step = self.step.next();
        Ok(self.step)
    }

    /// Go back one step (no-op at the first step or once complete).
    pub fn back(&mut self) -> WorkflowStep {
        self.step = self.step.previous();
        self.step
    }

    /// Complete the job from the sign-off step.
    pub fn finish(&mut self, completed_at: DateTime<Utc>) -> Result<MaintenanceRecord> {
        if self.step != WorkflowStep::SignOff {
            return Err(Error::InvalidInput(format!(
                "cannot finish from {} step",
                self.step
            )));
        }
        if self.signature.is_none() {
            return Err(Error::InvalidInput("signature is required".to_string()));
        }

        self.step = WorkflowStep::Complete;
        Ok(MaintenanceRecord {
            id: Uuid::now_v7(),
            asset_id: self.asset_id.clone(),
            asset_name: self.asset_name.clone(),
            technician: self.technician.clone(),
            completed_at,
            notes: self.notes.clone(),
            parts_used: self.parts_used.clone(),
            checklist_items: self.checklist.len(),
        })
    }
}
