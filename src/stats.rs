use chrono::{Datelike, NaiveDate};

use crate::models::TrainingSession;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_workouts: usize,
    pub total_sets: u64,
    pub total_reps: u64,
    pub total_tonnage: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseStats {
    pub name: String,
    pub sessions: usize,
    pub best_weight: Option<f64>,
}

/// Totals over all sessions. Reps and tonnage only count sets that have both
/// a reps and a weight entry.
pub fn summarize(sessions: &[TrainingSession]) -> Summary {
    let mut summary = Summary {
        total_workouts: sessions.len(),
        ..Default::default()
    };

    for session in sessions {
        summary.total_sets += session.set_count as u64;
        for (reps, weight) in session.reps.iter().zip(&session.weight) {
            summary.total_reps += *reps as u64;
            summary.total_tonnage += *reps as f64 * weight;
        }
    }

    summary
}

/// Sorted days of `month` that have at least one session.
pub fn workout_days_in_month(sessions: &[TrainingSession], year: i32, month: u32) -> Vec<u32> {
    let mut days: Vec<u32> = sessions
        .iter()
        .filter_map(|s| NaiveDate::parse_from_str(&s.date, "%Y-%m-%d").ok())
        .filter(|d| d.year() == year && d.month() == month)
        .map(|d| d.day())
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

pub fn per_exercise(sessions: &[TrainingSession]) -> Vec<ExerciseStats> {
    let mut out: Vec<ExerciseStats> = Vec::new();

    for session in sessions {
        let best = session.weight.iter().copied().reduce(f64::max);
        let entry = match out.iter_mut().position(|e| e.name == session.exercise_name) {
            Some(idx) => &mut out[idx],
            None => {
                out.push(ExerciseStats {
                    name: session.exercise_name.clone(),
                    sessions: 0,
                    best_weight: None,
                });
                let last = out.len() - 1;
                &mut out[last]
            }
        };
        entry.sessions += 1;
        entry.best_weight = match (entry.best_weight, best) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    out
}
