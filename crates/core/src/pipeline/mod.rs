pub mod face_tracking_orchestrator;
pub mod infrastructure;
pub mod outcome_channel;
pub mod replay_session_use_case;
pub mod tracking_logger;
