pub mod detection_outcome;
pub mod face_geometry_provider;
pub mod face_landmarks;
pub mod tracking_session;
