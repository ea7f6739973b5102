pub mod playback;
pub mod playlist;
pub mod queue;
pub mod search;
