//models.rs
use serde::{Deserialize, Serialize};

pub const SEED_EXERCISES: [&str; 3] = ["bench", "squat", "deadlift"];

/// One logged workout entry. `reps` and `weight` are meant to hold one value
/// per set but nothing checks that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSession {
    pub date: String,
    #[serde(rename = "workout")]
    pub exercise_name: String,
    #[serde(rename = "sets")]
    pub set_count: u32,
    pub reps: Vec<u32>,
    pub weight: Vec<f64>,
}

/// Root document kept under the storage key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FitnessData {
    #[serde(rename = "WorkoutSelection", default)]
    pub catalog: Vec<String>,
    #[serde(default)]
    pub sessions: Vec<TrainingSession>,
}

impl FitnessData {
    pub fn seed() -> Self {
        FitnessData {
            catalog: SEED_EXERCISES.iter().map(|s| s.to_string()).collect(),
            sessions: Vec::new(),
        }
    }

    pub fn has_exercise(&self, name: &str) -> bool {
        self.catalog.iter().any(|e| e == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_original_key_layout() {
        let raw = r#"{"WorkoutSelection":["bench"],"sessions":[
            {"date":"2024-06-01","workout":"bench","sets":2,"reps":[5,5],"weight":[60,62.5]}
        ]}"#;
        let data: FitnessData = serde_json::from_str(raw).unwrap();
        assert_eq!(data.catalog, vec!["bench".to_string()]);
        assert_eq!(data.sessions[0].exercise_name, "bench");
        assert_eq!(data.sessions[0].set_count, 2);
        assert_eq!(data.sessions[0].weight, vec![60.0, 62.5]);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let data: FitnessData = serde_json::from_str("{}").unwrap();
        assert!(data.catalog.is_empty());
        assert!(data.sessions.is_empty());
    }

    #[test]
    fn seed_has_three_exercises() {
        let seed = FitnessData::seed();
        assert_eq!(seed.catalog, vec!["bench", "squat", "deadlift"]);
        assert!(seed.sessions.is_empty());
        assert!(seed.has_exercise("squat"));
        assert!(!seed.has_exercise("rowing"));
    }
}
