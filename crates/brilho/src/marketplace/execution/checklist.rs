use serde::{Deserialize, Serialize};

/// Grouping of checklist steps as shown on the execution screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    Cleaning,
    Materials,
    Finish,
}

impl ChecklistCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cleaning => "Limpeza",
            Self::Materials => "Materiais",
            Self::Finish => "Finalização",
        }
    }
}

/// One execution step; toggled independently, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub description: String,
    pub category: ChecklistCategory,
    pub is_completed: bool,
}

/// Fixed set of execution steps attached to a job at assignment time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new(items: Vec<ChecklistItem>) -> Self {
        Self { items }
    }

    /// The standard residential execution checklist.
    pub fn standard_residential() -> Self {
        let steps: [(&str, ChecklistCategory); 8] = [
            ("Aspirar todos os cômodos", ChecklistCategory::Cleaning),
            ("Limpar banheiros completamente", ChecklistCategory::Cleaning),
            ("Organizar cozinha e lavar louças", ChecklistCategory::Cleaning),
            ("Passar pano nos móveis", ChecklistCategory::Cleaning),
            ("Limpar vidros e espelhos", ChecklistCategory::Cleaning),
            ("Conferir materiais utilizados", ChecklistCategory::Materials),
            ("Tirar fotos do antes/depois", ChecklistCategory::Finish),
            ("Solicitar assinatura do cliente", ChecklistCategory::Finish),
        ];

        Self {
            items: steps
                .iter()
                .enumerate()
                .map(|(index, (description, category))| ChecklistItem {
                    id: (index + 1).to_string(),
                    description: description.to_string(),
                    category: *category,
                    is_completed: false,
                })
                .collect(),
        }
    }

    /// Flip one item and return the recomputed progress percentage, or
    /// `None` when the id is unknown. Toggling twice restores the item.
    pub fn toggle(&mut self, item_id: &str) -> Option<f32> {
        let item = self.items.iter_mut().find(|item| item.id == item_id)?;
        item.is_completed = !item.is_completed;
        Some(self.progress_percentage())
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.total() - self.completed_count()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining_count() == 0
    }

    /// Completion ratio in percent; an empty checklist counts as 0.
    pub fn progress_percentage(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.completed_count() as f32 / self.total() as f32 * 100.0
    }
}
