use chrono::{Datelike, NaiveDate};
use eframe::{App, Frame, egui};
use egui::{Align, Color32, Layout, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use tracing::{error, info, warn};

use crate::actions::{ActionQueue, Pane, Stepper, UiAction};
use crate::errors::LiftLogResult;
use crate::models::TrainingSession;
use crate::set_rows::{SetRows, MIN_REPS, MIN_WEIGHT};
use crate::stats::{self, ExerciseStats, Summary};
use crate::store::{StorageBackend, Store};

pub const MAX_SETS: usize = 20;
const DEFAULT_SETS: usize = 3;
const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct WorkoutApp<B: StorageBackend> {
    store: Store<B>,
    today: fn() -> NaiveDate,
    pane: Pane,
    exercises: Vec<String>,
    selected_exercise: Option<usize>,
    set_rows: SetRows,
    adding_exercise: bool,
    new_exercise_name: String,
    calendar_date: NaiveDate,
    day_sessions: Vec<TrainingSession>,
    all_sessions: Vec<TrainingSession>,
    confirm_reset: bool,
    status: Option<String>,
}

impl<B: StorageBackend> WorkoutApp<B> {
    pub fn new(store: Store<B>, today: fn() -> NaiveDate) -> Self {
        let mut app = WorkoutApp {
            store,
            today,
            pane: Pane::Calendar,
            exercises: Vec::new(),
            selected_exercise: None,
            set_rows: SetRows::with_sets(DEFAULT_SETS),
            adding_exercise: false,
            new_exercise_name: String::new(),
            calendar_date: today(),
            day_sessions: Vec::new(),
            all_sessions: Vec::new(),
            confirm_reset: false,
            status: None,
        };

        let init = app.store.ensure_initialized().map(|_| ());
        app.report(init, None);
        app.reload_exercises();
        app.reload_sessions();
        app
    }

    fn report(&mut self, result: LiftLogResult<()>, ok_msg: Option<String>) {
        match result {
            Ok(()) => {
                if ok_msg.is_some() {
                    self.status = ok_msg;
                }
            }
            Err(e) => {
                error!("store operation failed: {}", e);
                self.status = Some(format!("Could not save: {}", e));
            }
        }
    }

    fn reload_exercises(&mut self) {
        self.exercises = self.store.list_exercises();
        self.selected_exercise = match self.selected_exercise {
            Some(idx) if idx < self.exercises.len() => Some(idx),
            _ if self.exercises.is_empty() => None,
            _ => Some(0),
        };
    }

    fn reload_sessions(&mut self) {
        let date = self.calendar_date.format(DATE_FORMAT).to_string();
        self.day_sessions = self.store.list_sessions_by_date(&date);
        self.all_sessions = self.store.list_sessions();
    }

    pub fn handle_action(&mut self, action: UiAction) {
        match action {
            UiAction::SelectPane(pane) => {
                self.pane = pane;
                match pane {
                    Pane::Workout => self.reload_exercises(),
                    Pane::Calendar | Pane::Stats => self.reload_sessions(),
                }
            }
            UiAction::SelectExercise(idx) => {
                if idx < self.exercises.len() {
                    self.selected_exercise = Some(idx);
                } else {
                    warn!(idx, "no exercise at index");
                }
            }
            UiAction::SetSetCount(sets) => self.set_rows.resize(sets.clamp(1, MAX_SETS)),
            UiAction::StepReps { row, step } => match self.set_rows.row_mut(row) {
                Some(r) => match step {
                    Stepper::Increment => r.increment_reps(),
                    Stepper::Decrement => r.decrement_reps(),
                },
                None => warn!(row, "no set row to update"),
            },
            UiAction::StepWeight { row, step } => match self.set_rows.row_mut(row) {
                Some(r) => match step {
                    Stepper::Increment => r.increment_weight(),
                    Stepper::Decrement => r.decrement_weight(),
                },
                None => warn!(row, "no set row to update"),
            },
            UiAction::EditRow { row, reps, weight } => match self.set_rows.row_mut(row) {
                Some(r) => {
                    r.reps = reps.max(MIN_REPS);
                    r.weight = weight.max(MIN_WEIGHT);
                }
                None => warn!(row, "no set row to update"),
            },
            UiAction::AddSession => self.add_session(),
            UiAction::OpenAddExercise => self.adding_exercise = true,
            UiAction::CancelAddExercise => {
                self.adding_exercise = false;
                self.new_exercise_name.clear();
            }
            UiAction::AddExercise(name) => self.add_exercise(&name),
            UiAction::SelectDate(date) => {
                self.calendar_date = date;
                self.reload_sessions();
            }
            UiAction::RequestReset => self.confirm_reset = true,
            UiAction::CancelReset => self.confirm_reset = false,
            UiAction::ResetData => self.reset_data(),
        }
    }

    fn add_session(&mut self) {
        let Some(name) = self
            .selected_exercise
            .and_then(|idx| self.exercises.get(idx))
            .cloned()
        else {
            warn!("add session requested without a selected exercise");
            self.status = Some("Pick an exercise first".to_string());
            return;
        };

        let date = (self.today)().format(DATE_FORMAT).to_string();
        let sets = self.set_rows.len() as u32;
        let result = self.store.append_session(
            &date,
            &name,
            sets,
            self.set_rows.reps(),
            self.set_rows.weights(),
        );
        self.report(result, Some(format!("Logged {} x {} on {}", sets, name, date)));
        self.reload_sessions();
    }

    fn add_exercise(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.status = Some("Exercise name is empty".to_string());
            return;
        }

        let result = self.store.add_exercise(name).map(|_| ());
        self.report(result, None);
        self.reload_exercises();
        self.selected_exercise = self
            .exercises
            .iter()
            .position(|e| e == name)
            .or(self.selected_exercise);
        self.adding_exercise = false;
        self.new_exercise_name.clear();
    }

    fn reset_data(&mut self) {
        info!("resetting stored data");
        self.confirm_reset = false;
        let result = self.store.reset().and_then(|_| self.store.ensure_initialized().map(|_| ()));
        self.report(result, Some("All data erased".to_string()));
        self.selected_exercise = None;
        self.set_rows = SetRows::with_sets(DEFAULT_SETS);
        self.reload_exercises();
        self.reload_sessions();
    }
}

impl<B: StorageBackend> App for WorkoutApp<B> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut actions = ActionQueue::new();

        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(18.0, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(28.0, egui::FontFamily::Proportional),
        );
        ctx.set_style(style);

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (pane, label) in [
                    (Pane::Calendar, "Calendar"),
                    (Pane::Workout, "Workout"),
                    (Pane::Stats, "Stats"),
                ] {
                    if ui.selectable_label(self.pane == pane, label).clicked() {
                        actions.push(UiAction::SelectPane(pane));
                    }
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if self.confirm_reset {
                        if ui.button("Cancel").clicked() {
                            actions.push(UiAction::CancelReset);
                        }
                        let erase = RichText::new("Erase everything").color(Color32::RED);
                        if ui.button(erase).clicked() {
                            actions.push(UiAction::ResetData);
                        }
                    } else if ui.button("Reset data").clicked() {
                        actions.push(UiAction::RequestReset);
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.status.as_deref().unwrap_or(""));
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.pane {
            Pane::Calendar => self.show_calendar_pane(ui, &mut actions),
            Pane::Workout => self.show_workout_pane(ui, &mut actions),
            Pane::Stats => self.show_stats_pane(ui),
        });

        for action in actions.drain() {
            self.handle_action(action);
        }
    }
}

impl<B: StorageBackend> WorkoutApp<B> {
    fn show_workout_pane(&mut self, ui: &mut Ui, actions: &mut ActionQueue) {
        ui.heading("Log a workout");
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            let selected = self.selected_exercise.and_then(|idx| self.exercises.get(idx));
            let selected_text = match selected {
                Some(name) => name.as_str(),
                None => "Select exercise",
            };
            egui::ComboBox::from_label("Exercise")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for (idx, name) in self.exercises.iter().enumerate() {
                        let is_selected = self.selected_exercise == Some(idx);
                        if ui.selectable_label(is_selected, name).clicked() {
                            actions.push(UiAction::SelectExercise(idx));
                        }
                    }
                });
            if !self.adding_exercise && ui.button("+ Add exercise").clicked() {
                actions.push(UiAction::OpenAddExercise);
            }
        });

        if self.adding_exercise {
            ui.horizontal(|ui| {
                let response = ui.text_edit_singleline(&mut self.new_exercise_name);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    actions.push(UiAction::AddExercise(self.new_exercise_name.clone()));
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CancelAddExercise);
                }
            });
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label("Sets:");
            let mut sets = self.set_rows.len();
            if ui.add(egui::DragValue::new(&mut sets).range(1..=MAX_SETS)).changed() {
                actions.push(UiAction::SetSetCount(sets));
            }
        });

        ui.add_space(10.0);
        ScrollArea::vertical().max_height(400.0).show(ui, |ui| {
            egui::Grid::new("set_rows").striped(true).num_columns(3).show(ui, |ui| {
                ui.label(RichText::new("Set").strong());
                ui.label(RichText::new("Reps").strong());
                ui.label(RichText::new("Weight").strong());
                ui.end_row();

                for (row, set) in self.set_rows.rows().iter().enumerate() {
                    ui.label(format!("{}", row + 1));

                    let mut reps = set.reps;
                    let mut weight = set.weight;
                    ui.horizontal(|ui| {
                        if ui.button("−").clicked() {
                            actions.push(UiAction::StepReps { row, step: Stepper::Decrement });
                        }
                        let reps_value = egui::DragValue::new(&mut reps).range(MIN_REPS..=u32::MAX);
                        if ui.add(reps_value).changed() {
                            actions.push(UiAction::EditRow { row, reps, weight });
                        }
                        if ui.button("+").clicked() {
                            actions.push(UiAction::StepReps { row, step: Stepper::Increment });
                        }
                    });
                    ui.horizontal(|ui| {
                        if ui.button("−").clicked() {
                            actions.push(UiAction::StepWeight { row, step: Stepper::Decrement });
                        }
                        let weight_value = egui::DragValue::new(&mut weight)
                            .range(MIN_WEIGHT..=f64::MAX)
                            .speed(0.5);
                        if ui.add(weight_value).changed() {
                            actions.push(UiAction::EditRow { row, reps, weight });
                        }
                        if ui.button("+").clicked() {
                            actions.push(UiAction::StepWeight { row, step: Stepper::Increment });
                        }
                    });
                    ui.end_row();
                }
            });
        });

        ui.add_space(10.0);
        if ui.button(RichText::new("Add").size(22.0).strong()).clicked() {
            actions.push(UiAction::AddSession);
        }
    }

    fn show_calendar_pane(&self, ui: &mut Ui, actions: &mut ActionQueue) {
        let date = self.calendar_date;
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                if let Some(prev) = date.pred_opt() {
                    actions.push(UiAction::SelectDate(prev));
                }
            }
            if ui.button("Today").clicked() {
                actions.push(UiAction::SelectDate((self.today)()));
            }
            if ui.button("▶").clicked() {
                if let Some(next) = date.succ_opt() {
                    actions.push(UiAction::SelectDate(next));
                }
            }
            ui.heading(date.format("%A, %d %B %Y").to_string());
        });

        let days = stats::workout_days_in_month(&self.all_sessions, date.year(), date.month());
        if days.is_empty() {
            ui.label("No workouts logged this month.");
        } else {
            let days: Vec<String> = days.iter().map(|d| d.to_string()).collect();
            ui.label(format!("Workout days this month: {}", days.join(", ")));
        }

        ui.add_space(20.0);
        if self.day_sessions.is_empty() {
            ui.label(RichText::new("Nothing logged on this day.").size(20.0));
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            for session in &self.day_sessions {
                ui.horizontal(|ui| {
                    ui.label("•");
                    ui.label(RichText::new(&session.exercise_name).strong());
                    ui.label(format!(": {} sets", session.set_count));
                });
                ui.label(format_sets(session));
                ui.add_space(6.0);
            }
        });
    }

    fn show_stats_pane(&self, ui: &mut Ui) {
        let Summary { total_workouts, total_sets, total_reps, total_tonnage } =
            stats::summarize(&self.all_sessions);

        ui.heading("Totals");
        ui.label(format!("Workouts: {}", total_workouts));
        ui.label(format!("Sets: {}", total_sets));
        ui.label(format!("Reps: {}", total_reps));
        ui.label(format!("Tonnage: {:.1}", total_tonnage));

        ui.add_space(15.0);
        ui.heading("By exercise");
        egui::Grid::new("per_exercise").striped(true).show(ui, |ui| {
            for entry in stats::per_exercise(&self.all_sessions) {
                let ExerciseStats { name, sessions, best_weight } = entry;
                ui.label(RichText::new(name).strong());
                ui.label(format!("{} sessions", sessions));
                ui.label(match best_weight {
                    Some(w) => format!("best {:.1}", w),
                    None => "-".to_string(),
                });
                ui.end_row();
            }
        });

        ui.add_space(15.0);
        ui.heading("History");
        TableBuilder::new(ui)
            .striped(true)
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(24.0, |mut header| {
                for title in ["Date", "Exercise", "Sets", "Reps x weight"] {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for session in self.all_sessions.iter().rev() {
                    body.row(22.0, |mut row| {
                        row.col(|ui| {
                            ui.label(&session.date);
                        });
                        row.col(|ui| {
                            ui.label(&session.exercise_name);
                        });
                        row.col(|ui| {
                            ui.label(session.set_count.to_string());
                        });
                        row.col(|ui| {
                            ui.label(format_sets(session));
                        });
                    });
                }
            });
    }
}

fn format_sets(session: &TrainingSession) -> String {
    session
        .reps
        .iter()
        .enumerate()
        .map(|(i, reps)| match session.weight.get(i) {
            Some(w) => format!("{} x {}", reps, w),
            None => format!("{} x ?", reps),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn app() -> WorkoutApp<MemoryBackend> {
        WorkoutApp::new(Store::new(MemoryBackend::default()), fixed_day)
    }

    #[test]
    fn starts_with_seed_catalog_selected() {
        let app = app();
        assert_eq!(app.exercises, vec!["bench", "squat", "deadlift"]);
        assert_eq!(app.selected_exercise, Some(0));
        assert_eq!(app.set_rows.len(), DEFAULT_SETS);
        assert_eq!(app.pane, Pane::Calendar);
    }

    #[test]
    fn add_session_uses_rows_and_today() {
        let mut app = app();
        app.handle_action(UiAction::SelectExercise(1));
        app.handle_action(UiAction::SetSetCount(2));
        app.handle_action(UiAction::EditRow { row: 0, reps: 5, weight: 100.0 });
        app.handle_action(UiAction::StepReps { row: 1, step: Stepper::Increment });
        app.handle_action(UiAction::StepWeight { row: 1, step: Stepper::Increment });
        app.handle_action(UiAction::AddSession);

        let sessions = app.store.list_sessions_by_date("2024-06-01");
        assert_eq!(
            sessions,
            vec![TrainingSession {
                date: "2024-06-01".into(),
                exercise_name: "squat".into(),
                set_count: 2,
                reps: vec![5, 2],
                weight: vec![100.0, 1.0],
            }]
        );
        assert_eq!(app.day_sessions.len(), 1);
    }

    #[test]
    fn set_count_is_clamped() {
        let mut app = app();
        app.handle_action(UiAction::SetSetCount(0));
        assert_eq!(app.set_rows.len(), 1);
        app.handle_action(UiAction::SetSetCount(500));
        assert_eq!(app.set_rows.len(), MAX_SETS);
    }

    #[test]
    fn missing_row_is_ignored() {
        let mut app = app();
        let before = app.set_rows.clone();
        app.handle_action(UiAction::StepReps { row: 99, step: Stepper::Increment });
        app.handle_action(UiAction::SelectExercise(99));
        assert_eq!(app.set_rows, before);
        assert_eq!(app.selected_exercise, Some(0));
    }

    #[test]
    fn add_exercise_refreshes_dropdown_and_selects_it() {
        let mut app = app();
        app.handle_action(UiAction::OpenAddExercise);
        assert!(app.adding_exercise);
        app.handle_action(UiAction::AddExercise("  rowing ".into()));
        app.handle_action(UiAction::AddExercise("rowing".into()));

        assert_eq!(app.exercises, vec!["bench", "squat", "deadlift", "rowing"]);
        assert_eq!(app.selected_exercise, Some(3));
        assert!(!app.adding_exercise);
    }

    #[test]
    fn blank_exercise_name_not_stored() {
        let mut app = app();
        app.handle_action(UiAction::AddExercise("   ".into()));
        assert_eq!(app.exercises.len(), 3);
        assert!(app.status.is_some());
    }

    #[test]
    fn reset_restores_seed() {
        let mut app = app();
        app.handle_action(UiAction::AddExercise("rowing".into()));
        app.handle_action(UiAction::AddSession);
        app.handle_action(UiAction::RequestReset);
        assert!(app.confirm_reset);
        app.handle_action(UiAction::ResetData);

        assert!(!app.confirm_reset);
        assert_eq!(app.exercises, vec!["bench", "squat", "deadlift"]);
        assert!(app.all_sessions.is_empty());
        assert!(app.day_sessions.is_empty());
    }

    #[test]
    fn selecting_date_reloads_day() {
        let mut app = app();
        app.handle_action(UiAction::AddSession);
        let next = fixed_day().succ_opt().unwrap();
        app.handle_action(UiAction::SelectDate(next));
        assert!(app.day_sessions.is_empty());
        app.handle_action(UiAction::SelectDate(fixed_day()));
        assert_eq!(app.day_sessions.len(), 1);
    }

    #[test]
    fn startup_keeps_unreadable_document() {
        let store = Store::new(MemoryBackend::with_contents("{\"WorkoutSel"));
        let app = WorkoutApp::new(store, fixed_day);
        assert_eq!(app.store.backend().contents(), Some("{\"WorkoutSel"));
        assert_eq!(app.exercises, vec!["bench", "squat", "deadlift"]);
    }

    #[test]
    fn infinite_weight_reported_not_stored() {
        let mut app = app();
        app.handle_action(UiAction::SetSetCount(1));
        app.handle_action(UiAction::EditRow { row: 0, reps: 5, weight: f64::INFINITY });
        app.handle_action(UiAction::AddSession);

        assert!(app.store.list_sessions().is_empty());
        assert!(app.status.as_deref().unwrap_or("").starts_with("Could not save"));
    }

    #[test]
    fn format_sets_marks_missing_weight() {
        let session = TrainingSession {
            date: "2024-06-01".into(),
            exercise_name: "bench".into(),
            set_count: 2,
            reps: vec![5, 3],
            weight: vec![60.0],
        };
        assert_eq!(format_sets(&session), "5 x 60, 3 x ?");
    }
}
