use chrono::NaiveDate;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Pane {
    Calendar,
    Workout,
    Stats,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Stepper {
    Increment,
    Decrement,
}

// Widgets queue these instead of touching the store directly; the app drains
// the queue once per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    SelectPane(Pane),

    // Workout pane
    SelectExercise(usize),
    SetSetCount(usize),
    StepReps { row: usize, step: Stepper },
    StepWeight { row: usize, step: Stepper },
    EditRow { row: usize, reps: u32, weight: f64 },
    AddSession,
    OpenAddExercise,
    CancelAddExercise,
    AddExercise(String),

    // Calendar pane
    SelectDate(NaiveDate),

    RequestReset,
    CancelReset,
    ResetData,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
