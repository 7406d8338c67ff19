pub mod history_recorder;
pub mod projector;

pub use history_recorder::HistoryRecorder;
pub use projector::Projector;
