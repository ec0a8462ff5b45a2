//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    editor::ValidationReport,
    models::{
        CompletionRecord, CompletionStatus, ExerciseRef, Plan, PlanExerciseEntry, PlanSummary,
    },
};

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ExerciseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** `{}`", self.name, self.id)?;
        if let Some(weight) = self.default_weight {
            write!(f, " (default weight {weight})")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for PlanExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}** {}x{} @ {}",
            self.sort_order,
            self.display_name(),
            self.sets,
            self.reps,
            self.tempo
        )?;
        if let Some(weight) = self.default_weight {
            write!(f, ", {weight}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if self.entries.is_empty() {
            writeln!(f, "\nNo exercises in this plan.")?;
        } else {
            writeln!(f, "\n## Exercises")?;
            writeln!(f)?;
            for entry in &self.entries {
                write!(f, "{entry}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_exercises > 0 {
            format!(
                " ({}/{} done, {} skipped)",
                self.completed, self.total_exercises, self.skipped
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.title, self.id)?;
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "- **Description**: {desc}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for CompletionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- `{}`: {}", self.exercise_id, self.status().with_icon())?;
        if let Some(reason) = &self.reason_id {
            write!(f, " [{reason}]")?;
        }
        if let Some(note) = &self.custom_reason {
            write!(f, " {note}")?;
        }
        if let Some(at) = &self.completed_at {
            write!(f, " ({})", LocalDateTime(at))?;
        }
        writeln!(f)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return writeln!(f, "All entries are valid.");
        }
        writeln!(f, "Found {} problem(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "- {error}")?;
        }
        Ok(())
    }
}
