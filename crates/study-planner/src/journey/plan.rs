use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PhaseStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyTask {
    pub key: &'static str,
    pub title: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct JourneyPhase {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tasks: Vec<JourneyTask>,
}

impl JourneyPhase {
    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    /// Whole-percent completion; a phase without tasks counts as 0%.
    pub fn completion_percentage(&self) -> u8 {
        percentage(self.completed_tasks(), self.tasks.len())
    }

    pub fn status(&self) -> PhaseStatus {
        match self.completed_tasks() {
            0 => PhaseStatus::NotStarted,
            done if done == self.tasks.len() => PhaseStatus::Completed,
            _ => PhaseStatus::InProgress,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JourneyPlanError {
    #[error("task with key {0} not found")]
    TaskNotFound(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseProgressEntry {
    pub key: &'static str,
    pub title: &'static str,
    pub status: PhaseStatus,
    pub status_label: &'static str,
    pub completed: usize,
    pub total: usize,
    pub completion_percentage: u8,
}

/// The four application phases and their checklists.
#[derive(Debug, Clone)]
pub struct JourneyPlan {
    phases: Vec<JourneyPhase>,
}

impl JourneyPlan {
    pub fn standard() -> Self {
        Self {
            phases: standard_phases(),
        }
    }

    pub fn phases(&self) -> &[JourneyPhase] {
        &self.phases
    }

    /// Flips a task's completion flag and returns the new value.
    pub fn toggle_task(&mut self, task_key: &str) -> Result<bool, JourneyPlanError> {
        let task = self
            .phases
            .iter_mut()
            .flat_map(|phase| phase.tasks.iter_mut())
            .find(|task| task.key == task_key)
            .ok_or_else(|| JourneyPlanError::TaskNotFound(task_key.to_owned()))?;

        task.completed = !task.completed;
        Ok(task.completed)
    }

    pub fn progress(&self) -> Vec<PhaseProgressEntry> {
        self.phases
            .iter()
            .map(|phase| {
                let status = phase.status();
                PhaseProgressEntry {
                    key: phase.key,
                    title: phase.title,
                    status,
                    status_label: status.label(),
                    completed: phase.completed_tasks(),
                    total: phase.tasks.len(),
                    completion_percentage: phase.completion_percentage(),
                }
            })
            .collect()
    }

    pub fn overall_progress(&self) -> u8 {
        let (done, total) = self.phases.iter().fold((0, 0), |(done, total), phase| {
            (done + phase.completed_tasks(), total + phase.tasks.len())
        });
        percentage(done, total)
    }

    /// First phase that still has open tasks.
    pub fn current_phase(&self) -> Option<&JourneyPhase> {
        self.phases
            .iter()
            .find(|phase| phase.status() != PhaseStatus::Completed)
    }
}

fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f32 / total as f32) * 100.0).round().clamp(0.0, 100.0) as u8
}

fn task(key: &'static str, title: &'static str) -> JourneyTask {
    JourneyTask {
        key,
        title,
        completed: false,
    }
}

fn standard_phases() -> Vec<JourneyPhase> {
    vec![
        JourneyPhase {
            key: "research",
            title: "Research & Planning",
            description: "Research universities and programs",
            tasks: vec![
                task("research_universities", "Research potential universities"),
                task("research_compare_costs", "Compare programs and costs"),
                task("research_visa_requirements", "Check visa requirements"),
                task("research_budget", "Plan budget"),
            ],
        },
        JourneyPhase {
            key: "preparation",
            title: "Application Preparation",
            description: "Prepare all necessary documents",
            tasks: vec![
                task("preparation_transcripts", "Prepare transcripts"),
                task("preparation_language_test", "Take language test (IELTS/TOEFL)"),
                task("preparation_statement", "Write personal statement"),
                task("preparation_recommendations", "Get recommendation letters"),
            ],
        },
        JourneyPhase {
            key: "submission",
            title: "Submit Applications",
            description: "Submit applications to universities",
            tasks: vec![
                task("submission_forms", "Complete application forms"),
                task("submission_fees", "Pay application fees"),
                task("submission_documents", "Submit all documents"),
                task("submission_tracking", "Track application status"),
            ],
        },
        JourneyPhase {
            key: "visa_travel",
            title: "Visa & Travel",
            description: "Apply for visa and arrange travel",
            tasks: vec![
                task("visa_acceptance_letter", "Receive acceptance letter"),
                task("visa_application", "Apply for student visa"),
                task("visa_accommodation", "Book accommodation"),
                task("visa_flights", "Book flights"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_plan_has_nothing_started() {
        let plan = JourneyPlan::standard();

        assert_eq!(plan.phases().len(), 4);
        assert_eq!(plan.overall_progress(), 0);
        assert!(plan
            .progress()
            .iter()
            .all(|entry| entry.status == PhaseStatus::NotStarted));
        assert_eq!(plan.current_phase().map(|p| p.key), Some("research"));
    }

    #[test]
    fn toggling_tasks_moves_phase_status() {
        let mut plan = JourneyPlan::standard();
        assert!(plan.toggle_task("research_universities").expect("task exists"));
        plan.toggle_task("research_compare_costs").expect("task exists");

        let research = &plan.progress()[0];
        assert_eq!(research.status, PhaseStatus::InProgress);
        assert_eq!(research.completion_percentage, 50);

        plan.toggle_task("research_visa_requirements").expect("task exists");
        plan.toggle_task("research_budget").expect("task exists");
        assert_eq!(plan.progress()[0].status, PhaseStatus::Completed);
        assert_eq!(plan.overall_progress(), 25);
        assert_eq!(plan.current_phase().map(|p| p.key), Some("preparation"));

        assert!(!plan.toggle_task("research_budget").expect("task exists"));
    }

    #[test]
    fn unknown_task_is_an_error() {
        let mut plan = JourneyPlan::standard();
        let err = plan.toggle_task("book_spaceship").expect_err("unknown task");
        assert!(matches!(err, JourneyPlanError::TaskNotFound(key) if key == "book_spaceship"));
    }
}
