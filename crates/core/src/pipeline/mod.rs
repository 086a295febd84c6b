pub mod censor_sequence_use_case;
pub mod pipeline_logger;
pub mod playback_session;
