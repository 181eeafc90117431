use thiserror::Error;

#[derive(Error, Debug)]
pub enum LiftLogError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Weight for {exercise} on {date} is not a finite number")]
    NonFiniteWeight { date: String, exercise: String },
}

pub type LiftLogResult<T> = Result<T, LiftLogError>;

impl From<std::io::Error> for LiftLogError {
    fn from(error: std::io::Error) -> Self {
        LiftLogError::Io(Box::new(error))
    }
}
