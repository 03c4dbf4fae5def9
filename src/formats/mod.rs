pub mod lrc;
pub mod time;
