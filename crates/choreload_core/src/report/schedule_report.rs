//! Read-only weekly schedule view.
//!
//! # Responsibility
//! - Group a run's assignment per participant for display.
//! - List chores that were not due and when they will be.
//!
//! # Invariants
//! - Sections follow the load table order of the assignment.
//! - The report never changes the run it was built from.

use crate::model::run::{RunId, ScheduleRun};
use serde::Serialize;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub chore: String,
    pub weight: f64,
    pub dedicated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticipantSection {
    pub participant: String,
    pub load: f64,
    pub chores: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedChore {
    pub chore: String,
    pub days_overdue: u32,
    /// Days left until the chore reaches its frequency; 0 means next run.
    pub due_in_days: u32,
    /// Runs until the chore is scheduled again; 1 means next run.
    pub due_in_runs: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub run_id: RunId,
    pub period_days: u32,
    pub sections: Vec<ParticipantSection>,
    pub skipped: Vec<SkippedChore>,
    pub load_spread: f64,
}

impl ScheduleReport {
    pub fn from_run(run: &ScheduleRun) -> Self {
        let assignment = &run.assignment;
        let sections = assignment
            .loads()
            .iter()
            .map(|entry| ParticipantSection {
                participant: entry.participant.clone(),
                load: entry.load,
                chores: assignment
                    .chores_for(&entry.participant)
                    .map(|assigned| ReportLine {
                        chore: assigned.chore.clone(),
                        weight: assigned.weight,
                        dedicated: assigned.dedicated,
                    })
                    .collect(),
            })
            .collect();

        let skipped = run
            .chores
            .iter()
            .filter(|chore| assignment.participant_for(&chore.name).is_none())
            .map(|chore| {
                let days_overdue = run.updated.get(&chore.name).unwrap_or_default();
                let due_in_days = chore.frequency_days.saturating_sub(days_overdue);
                SkippedChore {
                    chore: chore.name.clone(),
                    days_overdue,
                    due_in_days,
                    due_in_runs: runs_until_due(due_in_days, run.period_days),
                }
            })
            .collect();

        Self {
            run_id: run.run_id,
            period_days: run.period_days,
            sections,
            skipped,
            load_spread: assignment.load_spread(),
        }
    }

    pub fn assigned_count(&self) -> usize {
        self.sections.iter().map(|section| section.chores.len()).sum()
    }
}

// The next run compares the stored counter before adding another period.
fn runs_until_due(due_in_days: u32, period_days: u32) -> u32 {
    due_in_days
        .div_ceil(period_days.max(1))
        .saturating_add(1)
}

impl Display for ScheduleReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Chores for the next {} days ({} assigned)",
            self.period_days,
            self.assigned_count()
        )?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{} (load {:.1})", section.participant, section.load)?;
            if section.chores.is_empty() {
                writeln!(f, "  - nothing this week")?;
            }
            for line in &section.chores {
                let marker = if line.dedicated { " [dedicated]" } else { "" };
                writeln!(f, "  - {} ({:.1}){}", line.chore, line.weight, marker)?;
            }
        }
        if !self.skipped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Not due")?;
            writeln!(
                f,
                "  (an assigned chore restarts at 0 days, so one due every {} days comes back every second run)",
                self.period_days
            )?;
            for skipped in &self.skipped {
                match skipped.due_in_runs {
                    0 | 1 => writeln!(f, "  - {}: due next run", skipped.chore)?,
                    runs => writeln!(
                        f,
                        "  - {}: due in {} days ({} runs from now)",
                        skipped.chore, skipped.due_in_days, runs
                    )?,
                }
            }
        }
        Ok(())
    }
}
